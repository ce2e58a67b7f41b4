//! Scenarios every backend must pass identically.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hostgate_core::{Permission, PermissionSet, RequestKind};
use hostgate_store::store::{
    MemoryRuleStore, PersistentRuleStore, RuleStore, SqliteRowHandle, BOOTSTRAP_FRAME_HOST,
    BOOTSTRAP_REQUEST_HOST,
};

fn backends() -> Vec<(&'static str, Box<dyn RuleStore>)> {
    vec![
        ("memory", Box::new(MemoryRuleStore::new().unwrap()) as Box<dyn RuleStore>),
        (
            "sqlite",
            Box::new(PersistentRuleStore::new(SqliteRowHandle::open_in_memory().unwrap()).unwrap())
                as Box<dyn RuleStore>,
        ),
    ]
}

#[test]
fn bootstrap_row_is_seeded() {
    for (name, store) in backends() {
        let row = store
            .get_permissions(BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST)
            .unwrap();
        let mut want = PermissionSet::undecided();
        want.global = Permission::Deny;
        want.set(Some(RequestKind::Image), Permission::Allow);
        want.set(Some(RequestKind::Css), Permission::Allow);
        assert_eq!(row, want, "backend={name}");
    }
}

#[test]
fn unknown_pair_reads_undecided() {
    for (name, store) in backends() {
        let row = store.get_permissions("never.example", "seen.example").unwrap();
        assert_eq!(row, PermissionSet::undecided(), "backend={name}");
    }
}

#[test]
fn single_kind_write() {
    for (name, store) in backends() {
        store
            .store_permissions("example.com", "ads.example.com", Some(RequestKind::Script), Permission::Deny)
            .unwrap();
        let row = store.get_permissions("example.com", "ads.example.com").unwrap();

        assert_eq!(row.global, Permission::Undecided, "backend={name}");
        for kind in RequestKind::ALL {
            let want = if kind == RequestKind::Script { Permission::Deny } else { Permission::Undecided };
            assert_eq!(row.get(Some(kind)), want, "backend={name} kind={kind}");
        }
    }
}

#[test]
fn writes_preserve_other_slots() {
    for (name, store) in backends() {
        let (f, r) = ("news.example", "cdn.example");
        store.store_permissions(f, r, None, Permission::Allow).unwrap();
        store.store_permissions(f, r, Some(RequestKind::Frame), Permission::Deny).unwrap();
        store.store_permissions(f, r, Some(RequestKind::Xhr), Permission::Allow).unwrap();
        store.store_permissions(f, r, Some(RequestKind::Frame), Permission::Allow).unwrap();

        let row = store.get_permissions(f, r).unwrap();
        assert_eq!(row.global, Permission::Allow, "backend={name}");
        assert_eq!(row.get(Some(RequestKind::Frame)), Permission::Allow, "backend={name}");
        assert_eq!(row.get(Some(RequestKind::Xhr)), Permission::Allow, "backend={name}");
        assert_eq!(row.get(Some(RequestKind::Cookie)), Permission::Undecided, "backend={name}");
    }
}

#[test]
fn storing_undecided_resets_slot() {
    for (name, store) in backends() {
        let (f, r) = ("a.example", "b.example");
        store.store_permissions(f, r, Some(RequestKind::Cookie), Permission::Deny).unwrap();
        store.store_permissions(f, r, Some(RequestKind::Image), Permission::Allow).unwrap();
        store.store_permissions(f, r, Some(RequestKind::Cookie), Permission::Undecided).unwrap();

        let row = store.get_permissions(f, r).unwrap();
        assert_eq!(row.get(Some(RequestKind::Cookie)), Permission::Undecided, "backend={name}");
        assert_eq!(row.get(Some(RequestKind::Image)), Permission::Allow, "backend={name}");
    }
}

#[test]
fn keys_match_exactly() {
    for (name, store) in backends() {
        store.store_permissions("example.com", "cdn.example.com", None, Permission::Allow).unwrap();

        for (f, r) in [
            ("Example.com", "cdn.example.com"),
            ("example.com", "example.com"),
            ("*", "cdn.example.com"),
            ("example.com", ""),
        ] {
            assert_eq!(
                store.get_permissions(f, r).unwrap(),
                PermissionSet::undecided(),
                "backend={name} key=({f},{r})"
            );
        }
    }
}

#[test]
fn precedence_on_stored_row() {
    for (name, store) in backends() {
        let row = store
            .get_permissions(BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST)
            .unwrap();
        assert_eq!(row.effective(RequestKind::Image), Permission::Allow, "backend={name}");
        assert_eq!(row.effective(RequestKind::Css), Permission::Allow, "backend={name}");
        assert_eq!(row.effective(RequestKind::Script), Permission::Deny, "backend={name}");
        assert_eq!(row.effective(RequestKind::UnsecuredHttp), Permission::Deny, "backend={name}");
    }
}

#[test]
fn returned_rows_are_copies() {
    for (name, store) in backends() {
        let mut row = store.get_permissions("x.example", "y.example").unwrap();
        row.global = Permission::Allow;
        row.set(Some(RequestKind::Script), Permission::Allow);
        assert_eq!(
            store.get_permissions("x.example", "y.example").unwrap(),
            PermissionSet::undecided(),
            "backend={name}"
        );
    }
}
