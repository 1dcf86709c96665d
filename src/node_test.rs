use super::*;

#[test]
fn test_legal_bases_from_table_4_4() {
    let legal = [
        RecoverFlags::DB,
        RecoverFlags::DB | RecoverFlags::DBI,
        RecoverFlags::DB | RecoverFlags::DBSEAL,
        RecoverFlags::DB | RecoverFlags::DBI | RecoverFlags::DBSEAL,
        RecoverFlags::DBSEAL,
        RecoverFlags::UNDEF | RecoverFlags::DBSEAL,
    ];
    for flags in legal {
        assert!(flags.is_legal_base(), "{:?} should be legal", flags);
        // REMOVE layered on top stays legal (§4.4's REMOVE-bearing rows).
        assert!((flags | RecoverFlags::REMOVE).is_legal_base());
    }
}

#[test]
fn test_illegal_combinations_are_corrupted() {
    let illegal = [
        RecoverFlags::empty(),
        RecoverFlags::DBI,
        RecoverFlags::UNDEF,
        RecoverFlags::UNDEF | RecoverFlags::DBI,
        RecoverFlags::DBI | RecoverFlags::DBSEAL,
        RecoverFlags::UNDEF | RecoverFlags::DB,
    ];
    for flags in illegal {
        assert!(!flags.is_legal_base(), "{:?} should be illegal", flags);
    }
}

#[test]
fn test_placeholder_is_undef() {
    let node = Node::placeholder(5);
    assert!(node.is_undef());
    assert_eq!(node.id, 5);
    assert_eq!(node.parent_id, 5);
    assert!(node.footer.is_none());
}

#[test]
fn test_set_remove() {
    let mut node = Node::placeholder(5);
    assert!(!node.is_remove());
    node.set_remove();
    assert!(node.is_remove());
    assert!(node.is_undef());
}
