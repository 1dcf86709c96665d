use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use super::*;
use crate::{
    contracts::{StdVfs, Vfs},
    database::Database,
    filename,
    node_io,
    planner::NoopPlanner,
    scheme::Scheme,
};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn scratch_dir(label: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir =
        std::env::temp_dir().join(format!("strata-recover-{}-{}-{}", label, std::process::id(), n));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_node(vfs: &StdVfs, path: &std::path::Path) {
    node_io::write_bootstrap_node(vfs, path, None).unwrap();
}

#[test]
fn test_s1_clean_repo() {
    let vfs = StdVfs;
    let dir = scratch_dir("s1");
    write_node(&vfs, &dir.join("5.db"));
    write_node(&vfs, &dir.join("8.db"));

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Recovered);
    let mut published = report.published.clone();
    published.sort();
    assert_eq!(published, vec![5, 8]);
    assert!(report.removed.is_empty());
    assert!(database.nsn() >= 8);
    assert!(dir.join("5.db").exists());
    assert!(dir.join("8.db").exists());
    assert!(!database.is_malfunctioning());
}

#[test]
fn test_s2_crash_after_seal_before_parent_gc() {
    let vfs = StdVfs;
    let dir = scratch_dir("s2");
    write_node(&vfs, &dir.join("5.db"));
    write_node(&vfs, &dir.join("5.9.db.seal"));

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Recovered);
    assert_eq!(report.published, vec![9]);
    assert_eq!(report.removed, vec![5]);
    assert!(!dir.join("5.db").exists());
    assert!(!dir.join("5.9.db.seal").exists());
    assert!(dir.join("9.db").exists());
    assert!(database.nsn() >= 9);
}

#[test]
fn test_s3_crash_during_compaction_write() {
    let vfs = StdVfs;
    let dir = scratch_dir("s3");
    write_node(&vfs, &dir.join("5.db"));
    fs::write(dir.join("5.9.db.incomplete"), b"garbage").unwrap();

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Recovered);
    assert_eq!(report.published, vec![5]);
    assert!(report.removed.is_empty());
    assert!(!dir.join("5.9.db.incomplete").exists());
    assert!(dir.join("5.db").exists());
    assert!(database.nsn() >= 9);
}

#[test]
fn test_s4_crash_between_two_attempts() {
    let vfs = StdVfs;
    let dir = scratch_dir("s4");
    write_node(&vfs, &dir.join("5.db"));
    fs::write(dir.join("5.9.db.incomplete"), b"garbage").unwrap();
    write_node(&vfs, &dir.join("5.10.db.seal"));

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Recovered);
    assert_eq!(report.published, vec![5]);
    assert_eq!(report.removed, vec![10]);
    assert!(!dir.join("5.9.db.incomplete").exists());
    assert!(!dir.join("5.10.db.seal").exists());
    assert!(dir.join("5.db").exists());
    assert!(database.nsn() >= 10);
}

#[test]
fn test_s5_pending_gc() {
    let vfs = StdVfs;
    let dir = scratch_dir("s5");
    fs::write(dir.join("5.db.gc"), b"garbage").unwrap();
    write_node(&vfs, &dir.join("9.db"));

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Recovered);
    assert_eq!(report.published, vec![9]);
    assert!(!dir.join("5.db.gc").exists());
    assert!(dir.join("9.db").exists());
}

#[test]
fn test_s6_corrupted_seal_fails_recovery_without_removing_files() {
    let vfs = StdVfs;
    let dir = scratch_dir("s6");
    fs::write(dir.join("5.9.db.seal"), b"not a valid footer").unwrap();

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let err = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap_err();
    assert!(matches!(err, crate::Error::Corrupted { .. }));
    assert!(dir.join("5.9.db.seal").exists());
    assert!(database.is_malfunctioning());
    assert!(database.last_error().is_some());
}

#[test]
fn test_recover_cleans_up_orphaned_bootstrap_incomplete() {
    // Simulates a crash between write_bootstrap_node and its rename to
    // `<id>.db`: a single-numeral `.db.incomplete` is the only file on
    // disk. Recovery must unlink it and bootstrap fresh, and must not
    // leak it again on a subsequent run (spec.md §8 invariant #2).
    let vfs = StdVfs;
    let dir = scratch_dir("orphan-incomplete");
    let scheme = Scheme::default();
    scheme.write(&vfs, &dir).unwrap();
    fs::write(dir.join("3.db.incomplete"), b"garbage").unwrap();

    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();
    assert_eq!(outcome, Outcome::Deployed);
    assert_eq!(report.published.len(), 1);
    assert!(!dir.join("3.db.incomplete").exists());

    let names = vfs.read_dir(&dir).unwrap();
    assert!(names.iter().all(|n| !n.ends_with(".incomplete")));

    // A second recovery of the now-bootstrapped repository must not
    // rediscover or recreate the orphan.
    let (outcome2, report2) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();
    assert_eq!(outcome2, Outcome::Recovered);
    assert_eq!(report2.published, report.published);
    let names = vfs.read_dir(&dir).unwrap();
    assert!(names.iter().all(|n| !n.ends_with(".incomplete")));
}

#[test]
fn test_recover_absent_directory_bootstraps() {
    let vfs = StdVfs;
    let dir = scratch_dir("absent");
    fs::remove_dir_all(&dir).unwrap();

    let scheme = Scheme::default();
    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Deployed);
    assert_eq!(report.published.len(), 1);
    assert!(dir.join(crate::scheme::SCHEME_FILE_NAME).exists());
    assert!(dir.join(filename::db_name(report.published[0])).exists());
}

#[test]
fn test_recover_empty_directory_with_junk_only_bootstraps() {
    let vfs = StdVfs;
    let dir = scratch_dir("junk-only");
    let scheme = Scheme::default();
    scheme.write(&vfs, &dir).unwrap();
    fs::write(dir.join("README.md"), b"hello").unwrap();

    let database = Database::new();
    let mut planner = NoopPlanner::default();

    let (outcome, report) = recover(&vfs, &dir, &scheme, &database, &mut planner).unwrap();

    assert_eq!(outcome, Outcome::Deployed);
    assert_eq!(report.published.len(), 1);
    assert!(dir.join("README.md").exists());
}
