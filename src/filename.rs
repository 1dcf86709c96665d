//! §4.1 FilenameCodec: parse and format the on-disk filename shapes a
//! repository directory can contain — the four from spec.md §4.1 plus
//! Bootstrap's own single-numeral staging name (§4.7) — and the quiet skip
//! rules for hidden and unrecognized names.
//!
//! Grounded on the teacher's `shrobt::RootFileName` (`impl From<String>` /
//! `impl TryFrom<RootFileName> for String` round-tripping a single suffixed
//! filename shape) generalized to five shapes and two numeric fields.

use std::fmt;

/// Node sequence number: a per-database, monotonically assigned, forever
/// unique id. A bare `u64` newtype rather than the teacher's `ffi::OsString`
/// wrapper, since every shape here is purely numeric.
pub type NodeId = u64;

/// What a directory entry's name was classified as (§4.1's table), or why
/// it was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// `<id>.db`
    Db { id: NodeId },
    /// `<id>.db.gc`
    Remove { id: NodeId },
    /// `<parent>.<child>.db.incomplete`
    Incomplete { parent: NodeId, child: NodeId },
    /// `<id>.db.incomplete` — Bootstrap's own staging name (§4.7): a single
    /// numeral before the suffix, rather than the two-field compaction
    /// shape above. Evidence of a crash between `write_bootstrap_node` and
    /// the rename to `<id>.db`; unlinked unconditionally during scan, the
    /// same way a `.db.gc` marker is, since the data it names never got far
    /// enough to be anyone's canonical node.
    BootstrapIncomplete { id: NodeId },
    /// `<parent>.<child>.db.seal`
    Seal { parent: NodeId, child: NodeId },
    /// Name begins with `.` — skipped silently.
    Hidden,
    /// Name matches none of the shapes above — skipped, not an error.
    Unknown,
}

/// Parse one directory entry name into its classification. Never fails:
/// anything that isn't hidden and doesn't match one of the recognized
/// shapes is `Unknown`, per §4.1 "Any other name is skipped as unknown
/// file (no error)."
pub fn classify(name: &str) -> Classification {
    if name.starts_with('.') {
        return Classification::Hidden;
    }

    if let Some(rest) = name.strip_suffix(".db.gc") {
        return match parse_u64(rest) {
            Some(id) => Classification::Remove { id },
            None => Classification::Unknown,
        };
    }

    if let Some(rest) = name.strip_suffix(".db.incomplete") {
        if let Some((parent, child)) = parse_two(rest) {
            return Classification::Incomplete { parent, child };
        }
        return match parse_u64(rest) {
            Some(id) => Classification::BootstrapIncomplete { id },
            None => Classification::Unknown,
        };
    }

    if let Some(rest) = name.strip_suffix(".db.seal") {
        return match parse_two(rest) {
            Some((parent, child)) => Classification::Seal { parent, child },
            None => Classification::Unknown,
        };
    }

    if let Some(rest) = name.strip_suffix(".db") {
        return match parse_u64(rest) {
            Some(id) => Classification::Db { id },
            None => Classification::Unknown,
        };
    }

    Classification::Unknown
}

/// `<p>.<c>`: two dot-separated base-10 numerals, nothing else.
fn parse_two(rest: &str) -> Option<(NodeId, NodeId)> {
    let (p, c) = rest.split_once('.')?;
    Some((parse_u64(p)?, parse_u64(c)?))
}

/// Base-10 unsigned integer: no sign, no whitespace, no empty numeral, every
/// byte must be an ASCII digit. `si_processid` in the original source
/// accumulates without an overflow check; this crate rejects on overflow
/// instead of wrapping, since a filename that overflows `u64` cannot be a
/// real nsn/lsn this crate itself ever wrote.
fn parse_u64(rest: &str) -> Option<NodeId> {
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse::<u64>().ok()
}

pub fn db_name(id: NodeId) -> String {
    format!("{}.db", id)
}

pub fn gc_name(id: NodeId) -> String {
    format!("{}.db.gc", id)
}

pub fn incomplete_name(parent: NodeId, child: NodeId) -> String {
    format!("{}.{}.db.incomplete", parent, child)
}

/// Bootstrap's own staging name (§4.7): `<nsn>.db.incomplete`, a single
/// numeral before the suffix, distinct from the two-field
/// `<p>.<c>.db.incomplete` compaction shape above. `classify` recognizes
/// both; this one reports `BootstrapIncomplete` rather than `Incomplete`
/// so DirectoryScan can unlink it unconditionally instead of flagging a
/// parent that was never a compaction target.
pub fn bootstrap_incomplete_name(id: NodeId) -> String {
    format!("{}.db.incomplete", id)
}

pub fn seal_name(parent: NodeId, child: NodeId) -> String {
    format!("{}.{}.db.seal", parent, child)
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Db { id } => write!(f, "db({})", id),
            Classification::Remove { id } => write!(f, "gc({})", id),
            Classification::Incomplete { parent, child } => {
                write!(f, "incomplete({}.{})", parent, child)
            }
            Classification::BootstrapIncomplete { id } => write!(f, "boot-incomplete({})", id),
            Classification::Seal { parent, child } => write!(f, "seal({}.{})", parent, child),
            Classification::Hidden => write!(f, "hidden"),
            Classification::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
#[path = "filename_test.rs"]
mod filename_test;
