use super::*;
use crate::node::{Node, RecoverFlags};

fn db_node(id: u64) -> Node {
    Node {
        id,
        parent_id: id,
        recover_flags: RecoverFlags::DB,
        footer: None,
    }
}

#[test]
fn test_insert_and_get() {
    let mut tracker = Tracker::new();
    tracker.insert(db_node(5));
    tracker.insert(db_node(8));

    assert_eq!(tracker.count(), 2);
    assert!(tracker.get(5).is_some());
    assert!(tracker.get(8).is_some());
    assert!(tracker.get(9).is_none());
    assert_eq!(tracker.max_nsn(), 8);
}

#[test]
fn test_ascending_descending_order() {
    let mut tracker = Tracker::new();
    for id in [8, 5, 9, 1] {
        tracker.insert(db_node(id));
    }
    assert_eq!(tracker.ids_ascending(), vec![1, 5, 8, 9]);
    assert_eq!(tracker.ids_descending(), vec![9, 8, 5, 1]);
}

#[test]
fn test_replace_returns_old() {
    let mut tracker = Tracker::new();
    tracker.insert(Node {
        id: 5,
        parent_id: 5,
        recover_flags: RecoverFlags::UNDEF,
        footer: None,
    });
    let old = tracker.replace(db_node(5));
    assert!(old.is_some());
    assert_eq!(old.unwrap().recover_flags, RecoverFlags::UNDEF);
    assert_eq!(tracker.get(5).unwrap().recover_flags, RecoverFlags::DB);
    assert_eq!(tracker.count(), 1);
}

#[test]
fn test_max_lsn_monotonic() {
    let mut tracker = Tracker::new();
    tracker.bump_lsn(10);
    tracker.bump_lsn(3);
    tracker.bump_lsn(42);
    assert_eq!(tracker.max_lsn(), 42);
}

#[test]
fn test_remove() {
    let mut tracker = Tracker::new();
    tracker.insert(db_node(5));
    let removed = tracker.remove(5);
    assert!(removed.is_some());
    assert!(tracker.is_empty());
}
