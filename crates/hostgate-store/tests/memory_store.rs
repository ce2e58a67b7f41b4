#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hostgate_core::{Permission, RequestKind};
use hostgate_store::store::{MemoryRuleStore, RuleStore};

#[test]
fn bootstrap_creates_one_row() {
    let store = MemoryRuleStore::new().unwrap();
    assert_eq!(store.row_count().unwrap(), 1);
}

#[test]
fn reads_never_create_rows() {
    let store = MemoryRuleStore::new().unwrap();
    let before = store.row_count().unwrap();

    store.get_permissions("unknown.example", "other.example").unwrap();
    store.get_permissions("*", "other.example").unwrap();
    store.get_permissions("unknown.example", "").unwrap();

    assert_eq!(store.row_count().unwrap(), before);
}

#[test]
fn writes_materialize_rows_once() {
    let store = MemoryRuleStore::new().unwrap();
    store.store_permissions("a.example", "b.example", None, Permission::Deny).unwrap();
    store.store_permissions("a.example", "b.example", Some(RequestKind::Xhr), Permission::Allow).unwrap();
    store.store_permissions("a.example", "c.example", None, Permission::Allow).unwrap();
    assert_eq!(store.row_count().unwrap(), 3);
}

#[test]
fn undecided_write_still_materializes_row() {
    let store = MemoryRuleStore::new().unwrap();
    store
        .store_permissions("a.example", "b.example", Some(RequestKind::Frame), Permission::Undecided)
        .unwrap();
    assert_eq!(store.row_count().unwrap(), 2);
    assert!(store.get_permissions("a.example", "b.example").unwrap().is_empty());
}

#[test]
fn dump_does_not_mutate() {
    let store = MemoryRuleStore::new().unwrap();
    store.dump().unwrap();
    assert_eq!(store.row_count().unwrap(), 1);
}
