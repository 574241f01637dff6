//! Tests for set reconciliation and association sync

use std::collections::BTreeSet;

use gwsync::core::models::{ApiKeySpec, Severity};
use gwsync::core::services::{reconcile, sync_associations};

use crate::common::mocks::MockAssociationStore;

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn apis(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

// =============================================================================
// PURE RECONCILIATION
// =============================================================================

#[test]
fn test_reconcile_is_minimal() {
    let plan = reconcile(&set(&["B", "C", "D"]), &set(&["A", "B", "C"]));

    assert_eq!(plan.to_add, set(&["D"]));
    assert_eq!(plan.to_remove, set(&["A"]));
    assert_eq!(plan.unchanged, set(&["B", "C"]));
    assert!(!plan.is_converged());
}

#[test]
fn test_reconcile_from_nothing() {
    let plan = reconcile(&set(&["A", "B"]), &BTreeSet::new());
    assert_eq!(plan.to_add, set(&["A", "B"]));
    assert!(plan.to_remove.is_empty());
}

#[test]
fn test_reconcile_to_nothing() {
    let plan = reconcile(&BTreeSet::new(), &set(&["A", "B"]));
    assert!(plan.to_add.is_empty());
    assert_eq!(plan.to_remove, set(&["A", "B"]));
}

// =============================================================================
// ASSOCIATION SYNC
// =============================================================================

#[test]
fn test_sync_adds_and_removes_only_the_difference() {
    let store = MockAssociationStore::<String>::new("api", &["A", "B", "C"]);

    let diags = sync_associations(&store, "app-1", &apis(&["B", "C", "D"]));

    assert!(diags.is_empty());
    assert_eq!(store.calls(), vec!["add D", "remove A"]);
    assert_eq!(store.existing(), set(&["B", "C", "D"]));
}

#[test]
fn test_sync_converged_set_makes_no_calls() {
    let store = MockAssociationStore::<String>::new("api", &["A", "B"]);

    let diags = sync_associations(&store, "app-1", &apis(&["B", "A"]));

    assert!(diags.is_empty());
    assert!(store.calls().is_empty());
}

#[test]
fn test_sync_failure_does_not_stop_other_calls() {
    let store = MockAssociationStore::<String>::new("api", &["A", "B"]).failing("add C");

    let diags = sync_associations(&store, "app-1", &apis(&["C", "D"]));

    assert_eq!(store.calls(), vec!["add C", "add D", "remove A", "remove B"]);
    assert_eq!(diags.len(), 1);
    assert!(diags.has_errors());
    let error = diags.errors().next().unwrap();
    assert!(error.summary.contains("add api C failed for app-1"));
    assert_eq!(store.existing(), set(&["D"]));
}

#[test]
fn test_sync_collects_every_failure() {
    let store = MockAssociationStore::<String>::new("api", &["A"])
        .failing("add B")
        .failing("remove A");

    let diags = sync_associations(&store, "app-1", &apis(&["B"]));

    assert_eq!(diags.errors().count(), 2);
}

#[test]
fn test_sync_list_failure_aborts_the_set() {
    let store = MockAssociationStore::<String>::new("api", &["A"]).failing("list");

    let diags = sync_associations(&store, "app-1", &apis(&["B"]));

    assert!(diags.has_errors());
    assert!(store.calls().is_empty());
    let error = diags.iter().next().unwrap();
    assert_eq!(error.severity, Severity::Error);
    assert!(error.summary.contains("list apis failed for app-1"));
}

#[test]
fn test_sync_api_keys_add_full_payload_and_remove_by_id() {
    let store = MockAssociationStore::<ApiKeySpec>::new("api key", &["old-key"]);
    let mut key = ApiKeySpec::new("new-key");
    key.secret = Some("s3cret".to_string());

    let diags = sync_associations(&store, "app-1", &[key]);

    assert!(diags.is_empty());
    assert_eq!(store.calls(), vec!["add new-key", "remove old-key"]);
}

#[test]
fn test_sync_api_key_failures_name_the_key_kind() {
    let store = MockAssociationStore::<ApiKeySpec>::new("api key", &["old-key"])
        .failing("remove old-key");

    let diags = sync_associations(&store, "app-1", &[]);

    let error = diags.errors().next().unwrap();
    assert!(error.summary.contains("remove api key old-key"));
}

#[test]
fn test_sync_repeated_ids_are_added_once() {
    let store = MockAssociationStore::<String>::new("api", &[]);

    let diags = sync_associations(&store, "app-1", &apis(&["A", "A"]));

    assert!(diags.is_empty());
    assert_eq!(store.calls(), vec!["add A"]);
}
