//! §4.2 Tracker: an ordered-by-id index of [`Node`]s plus the running
//! `max_nsn`/`max_lsn` watermarks.
//!
//! Backed by `std::collections::BTreeMap`, the idiomatic Rust stand-in for
//! the ordered-by-id container the spec calls for — ascending iteration is
//! the map's natural order, descending iteration is `.rev()` over it. This
//! sidesteps reaching for the teacher's own `llrb`/red-black-tree module,
//! which exists in this codebase to serve as a queryable *index* over
//! key/value entries, not as a generic ordered map; `BTreeMap` is the
//! stdlib's direct equivalent for Tracker's narrower job.

use std::collections::BTreeMap;

use crate::{filename::NodeId, node::Node};

#[derive(Default)]
pub struct Tracker {
    nodes: BTreeMap<NodeId, Node>,
    max_nsn: NodeId,
    max_lsn: u64,
}

impl Tracker {
    pub fn new() -> Tracker {
        Tracker::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn insert(&mut self, node: Node) {
        self.bump_nsn(node.id);
        self.bump_nsn(node.parent_id);
        self.nodes.insert(node.id, node);
    }

    /// Replace the node at `old.id`, returning the node that was there (the
    /// placeholder DirectoryScan's DB branch merges flags out of).
    pub fn replace(&mut self, new: Node) -> Option<Node> {
        self.bump_nsn(new.id);
        self.bump_nsn(new.parent_id);
        self.nodes.insert(new.id, new)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter_ascending(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All ids currently tracked, ascending, snapshotted up front so
    /// Validator and Publisher can mutate individual nodes by id while
    /// walking the order.
    pub fn ids_ascending(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn ids_descending(&self) -> Vec<NodeId> {
        self.nodes.keys().rev().copied().collect()
    }

    pub fn max_nsn(&self) -> NodeId {
        self.max_nsn
    }

    pub fn max_lsn(&self) -> u64 {
        self.max_lsn
    }

    pub fn bump_nsn(&mut self, id: NodeId) {
        self.max_nsn = self.max_nsn.max(id);
    }

    pub fn bump_lsn(&mut self, lsn: u64) {
        self.max_lsn = self.max_lsn.max(lsn);
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tracker_test;
