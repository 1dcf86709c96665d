//! The surrounding database object (§1's "database-level object lifecycle",
//! external collaborator) reduced to exactly the slice recovery touches: the
//! nsn/lsn counters and the error slot.
//!
//! Modeled on the `Arc<AtomicU64>` seqno held by the teacher's
//! `wral::journals::Journals`, generalized to two counters, plus a
//! `Mutex<Option<Error>>` error slot and `AtomicBool` malfunctioning flag
//! matching §7: "the error is recorded in the database's error slot ... and
//! the database is marked malfunctioning."

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering::SeqCst},
    Arc, Mutex,
};

use crate::Error;

/// Per-database sequence counters and fault state, owned by the embedding
/// application and passed into [`crate::recover`] by reference (§9:
/// "counters owned by the database... no process-wide singleton").
#[derive(Clone)]
pub struct Database {
    nsn: Arc<AtomicU64>,
    lsn: Arc<AtomicU64>,
    error: Arc<Mutex<Option<String>>>,
    malfunctioning: Arc<AtomicBool>,
}

impl Default for Database {
    fn default() -> Self {
        Database::new()
    }
}

impl Database {
    pub fn new() -> Database {
        Database {
            nsn: Arc::new(AtomicU64::new(0)),
            lsn: Arc::new(AtomicU64::new(0)),
            error: Arc::new(Mutex::new(None)),
            malfunctioning: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn nsn(&self) -> u64 {
        self.nsn.load(SeqCst)
    }

    pub fn lsn(&self) -> u64 {
        self.lsn.load(SeqCst)
    }

    /// Allocate the next nsn, for Bootstrap's `nsn = ++nsn` (§4.7).
    pub fn next_nsn(&self) -> u64 {
        self.nsn.fetch_add(1, SeqCst) + 1
    }

    /// Raise the nsn counter to at least `value`, never lowering it.
    pub fn bump_nsn(&self, value: u64) {
        self.nsn.fetch_max(value, SeqCst);
    }

    /// Raise the lsn counter to at least `value`, never lowering it.
    pub fn bump_lsn(&self, value: u64) {
        self.lsn.fetch_max(value, SeqCst);
    }

    pub fn is_malfunctioning(&self) -> bool {
        self.malfunctioning.load(SeqCst)
    }

    /// Record a fatal recovery error and mark the database malfunctioning,
    /// matching §7's "subsequent operations on it fail fast until the
    /// process restarts."
    pub fn mark_malfunctioning(&self, err: &Error) {
        *self.error.lock().expect("database error slot poisoned") = Some(err.to_string());
        self.malfunctioning.store(true, SeqCst);
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.lock().expect("database error slot poisoned").clone()
    }
}
