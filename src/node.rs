//! §3's Node: the in-memory handle for one on-disk node file, carrying its
//! identity, its parent identity and a recovery-state bitset.
//!
//! `recover_flags` is a `bitflags`-based bitset per the EXPANSION in
//! SPEC_FULL.md §3, so the legal-combination table in §4.4 becomes plain
//! bitwise unions instead of a hand-rolled enum of sixteen variants.

use bitflags::bitflags;

use crate::{filename::NodeId, node_io::Footer};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RecoverFlags: u8 {
        const DB     = 0b0000_0001;
        const DBI    = 0b0000_0010;
        const DBSEAL = 0b0000_0100;
        const REMOVE = 0b0000_1000;
        const UNDEF  = 0b0001_0000;
    }
}

/// Every flag combination §4.4 accepts after `DirectoryScan` completes,
/// before `REMOVE` is layered on by `Validator`. Checked with `REMOVE`
/// masked off, since §4.4's table lists the `REMOVE`-bearing variants
/// separately but they are legal at exactly the same base combinations.
const LEGAL_BASES: &[RecoverFlags] = &[
    RecoverFlags::DB,
    RecoverFlags::from_bits_truncate(RecoverFlags::DB.bits() | RecoverFlags::DBI.bits()),
    RecoverFlags::from_bits_truncate(RecoverFlags::DB.bits() | RecoverFlags::DBSEAL.bits()),
    RecoverFlags::from_bits_truncate(
        RecoverFlags::DB.bits() | RecoverFlags::DBI.bits() | RecoverFlags::DBSEAL.bits(),
    ),
    RecoverFlags::DBSEAL,
    RecoverFlags::from_bits_truncate(RecoverFlags::UNDEF.bits() | RecoverFlags::DBSEAL.bits()),
];

impl RecoverFlags {
    /// §4.4: is this (REMOVE-masked) combination one of the legal states a
    /// scanned node can be in? Anything else is a corrupted repository.
    pub fn is_legal_base(self) -> bool {
        let base = self & !RecoverFlags::REMOVE;
        LEGAL_BASES.contains(&base)
    }
}

/// An in-memory handle for one on-disk node file (or, when `UNDEF` is set,
/// a placeholder for a parent never directly observed).
pub struct Node {
    pub id: NodeId,
    pub parent_id: NodeId,
    pub recover_flags: RecoverFlags,
    /// Present for `DB`/`DBSEAL`-bearing nodes once opened; `None` for a
    /// bare `UNDEF` placeholder that has not yet gained a file of its own.
    pub footer: Option<Footer>,
}

impl Node {
    /// A bare placeholder, created while scanning a child that references a
    /// parent not yet (or never) seen directly.
    pub fn placeholder(id: NodeId) -> Node {
        Node {
            id,
            parent_id: id,
            recover_flags: RecoverFlags::UNDEF,
            footer: None,
        }
    }

    pub fn is_undef(&self) -> bool {
        self.recover_flags.contains(RecoverFlags::UNDEF)
    }

    pub fn set_remove(&mut self) {
        self.recover_flags.insert(RecoverFlags::REMOVE);
    }

    pub fn is_remove(&self) -> bool {
        self.recover_flags.contains(RecoverFlags::REMOVE)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
