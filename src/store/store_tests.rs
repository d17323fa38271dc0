//! Tests for RowStore.

use super::*;
use crate::model::{Role, Score, Status};
use crate::test_harness::{five_rows, id, ids, row};

fn loaded() -> RowStore {
    let mut store = RowStore::new();
    store.load(five_rows());
    store
}

fn store_ids(store: &RowStore) -> Vec<&str> {
    store.ids().map(|id| id.as_str()).collect()
}

// ===== load =====

#[test]
fn load_replaces_existing_rows() {
    let mut store = loaded();
    store.load(vec![row(9, "Zed Young", Role::Intern, Status::Pending, 5)]);

    assert_eq!(store.len(), 1);
    assert!(store.get("user-1").is_none());
    assert!(store.get("user-9").is_some());
}

#[test]
fn load_drops_duplicate_ids_keeping_first() {
    let mut store = RowStore::new();
    store.load(vec![
        row(1, "First", Role::Admin, Status::Active, 10),
        row(1, "Second", Role::Admin, Status::Active, 20),
        row(2, "Other", Role::Admin, Status::Active, 30),
    ]);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("user-1").map(|r| r.name.as_str()), Some("First"));
}

#[test]
fn load_preserves_insertion_order() {
    let store = loaded();
    assert_eq!(
        store_ids(&store),
        vec!["user-1", "user-2", "user-3", "user-4", "user-5"]
    );
}

// ===== get / contains =====

#[test]
fn get_missing_returns_none() {
    let store = loaded();
    assert!(store.get("user-99").is_none());
    assert!(!store.contains("user-99"));
}

// ===== update =====

#[test]
fn update_applies_partial_patch() {
    let mut store = loaded();
    let changed = store.update("user-2", &RowPatch::status(Status::Suspended));

    assert!(changed);
    let updated = store.get("user-2").expect("row present");
    assert_eq!(updated.status, Status::Suspended);
    assert_eq!(updated.score, Score::new(50).expect("valid"));
}

#[test]
fn update_missing_id_is_noop() {
    let mut store = loaded();
    let version = store.version();

    let changed = store.update("user-42", &RowPatch::status(Status::Active));

    assert!(!changed);
    assert_eq!(store.version(), version, "No-op must not bump version");
}

#[test]
fn update_with_identical_value_does_not_bump_version() {
    let mut store = loaded();
    let version = store.version();

    store.update("user-1", &RowPatch::status(Status::Active));

    assert_eq!(store.version(), version);
}

// ===== delete =====

#[test]
fn delete_removes_row_and_keeps_survivor_order() {
    let mut store = loaded();

    assert!(store.delete("user-2"));

    assert_eq!(store_ids(&store), vec!["user-1", "user-3", "user-4", "user-5"]);
    assert!(store.get("user-2").is_none());
}

#[test]
fn delete_is_idempotent() {
    let mut store = loaded();
    assert!(store.delete("user-3"));
    let version = store.version();

    assert!(!store.delete("user-3"));
    assert_eq!(store.version(), version);
}

#[test]
fn delete_keeps_index_consistent_for_later_rows() {
    let mut store = loaded();
    store.delete("user-1");

    // Every survivor must still be reachable by id after positions shift.
    for n in 2..=5 {
        let key = format!("user-{n}");
        assert_eq!(store.get(&key).map(|r| r.id.as_str()), Some(key.as_str()));
    }
}

// ===== delete_many =====

#[test]
fn delete_many_removes_only_present_ids() {
    let mut store = loaded();
    let doomed = ids(&["user-1", "user-4", "user-77"]);

    let removed = store.delete_many(&doomed);

    assert_eq!(removed, 2);
    assert_eq!(store_ids(&store), vec!["user-2", "user-3", "user-5"]);
    assert_eq!(store.get("user-5").map(|r| r.id.clone()), Some(id("user-5")));
}

#[test]
fn delete_many_with_no_matches_keeps_version() {
    let mut store = loaded();
    let version = store.version();

    assert_eq!(store.delete_many(&ids(&["nobody"])), 0);
    assert_eq!(store.version(), version);
}

// ===== version =====

#[test]
fn version_increases_on_load_and_mutation() {
    let mut store = RowStore::new();
    let v0 = store.version();
    store.load(five_rows());
    let v1 = store.version();
    store.delete("user-1");
    let v2 = store.version();

    assert!(v1 > v0);
    assert!(v2 > v1);
}
