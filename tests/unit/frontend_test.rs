//! Tests for the frontend create, update and delete flows

use gwsync::core::models::{FrontendSpec, LifecycleState, Severity};
use gwsync::core::services::{converge_frontend, create_frontend, delete_frontend, update_frontend};

use crate::common::mocks::MockFrontendClient;
use crate::common::{raw_status, status};

use LifecycleState::{Deprecated, Published, Unpublished};

fn spec(state: LifecycleState) -> FrontendSpec {
    let mut spec = FrontendSpec::named("fe-1-name");
    spec.api_id = "backend-1".to_string();
    spec.path = "/pets".to_string();
    spec.state = state;
    spec
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_structural_change_on_published_frontend_unpublishes_temporarily() {
    let client = MockFrontendClient::new(status("fe-1", Published));
    let prior = spec(Published);
    let mut desired = prior.clone();
    desired.path = "/v2/pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["unpublish", "update", "publish"]);
    assert!(!outcome.diagnostics.has_errors());
    let warning = outcome.diagnostics.warnings().next().unwrap();
    assert_eq!(
        warning.summary,
        "The api fe-1-name has been temporarily unpublished to allow some changes"
    );
    assert_eq!(outcome.status.unwrap().lifecycle(), Some(Published));
}

#[test]
fn test_structural_change_on_deprecated_frontend_restores_deprecation() {
    let client = MockFrontendClient::new(status("fe-1", Deprecated));
    let prior = spec(Deprecated);
    let mut desired = prior.clone();
    desired.vhost = "api.example.com".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(
        client.calls(),
        vec!["undeprecate", "unpublish", "update", "publish", "deprecate"]
    );
    assert_eq!(outcome.status.unwrap().lifecycle(), Some(Deprecated));
}

#[test]
fn test_descriptive_change_is_applied_live() {
    let client = MockFrontendClient::new(status("fe-1", Published));
    let prior = spec(Published);
    let mut desired = prior.clone();
    desired.summary = "Pets, now with cats".to_string();
    desired.description_markdown = "# Pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["update"]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_state_only_change_makes_no_update_call() {
    let client = MockFrontendClient::new(status("fe-1", Published));
    let prior = spec(Published);
    let desired = spec(Deprecated);

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["deprecate"]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_unpublished_frontend_is_updated_in_place() {
    let client = MockFrontendClient::new(status("fe-1", Unpublished));
    let prior = spec(Unpublished);
    let mut desired = spec(Published);
    desired.path = "/v2/pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["update", "publish"]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_failed_unpublish_aborts_update() {
    let client = MockFrontendClient::new(status("fe-1", Published)).failing("unpublish");
    let prior = spec(Published);
    let mut desired = prior.clone();
    desired.path = "/v2/pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["unpublish"]);
    assert!(outcome.diagnostics.has_errors());
    assert_eq!(outcome.diagnostics.warnings().count(), 0);
}

#[test]
fn test_failed_update_leaves_frontend_unpublished() {
    let client = MockFrontendClient::new(status("fe-1", Published)).failing("update");
    let prior = spec(Published);
    let mut desired = prior.clone();
    desired.path = "/v2/pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert_eq!(client.calls(), vec!["unpublish", "update"]);
    assert!(outcome.diagnostics.has_errors());
    assert_eq!(outcome.status.unwrap().lifecycle(), Some(Unpublished));
}

#[test]
fn test_pending_frontend_is_not_walked() {
    let client = MockFrontendClient::new(raw_status("fe-1", "pending", false));
    let prior = spec(Published);
    let mut desired = prior.clone();
    desired.path = "/v2/pets".to_string();

    let outcome = update_frontend(&client, "fe-1", &prior, &desired);

    assert!(!outcome.diagnostics.has_errors());
    assert!(
        outcome
            .diagnostics
            .iter()
            .all(|d| !d.summary.contains("temporarily unpublished"))
    );
}

// =============================================================================
// CREATE / DELETE
// =============================================================================

#[test]
fn test_create_reports_failure() {
    let client = MockFrontendClient::new(status("fe-1", Unpublished)).failing("create");

    let outcome = create_frontend(&client, &spec(Published));

    assert!(outcome.status.is_none());
    assert!(outcome.diagnostics.has_errors());
}

#[test]
fn test_delete_unpublishes_first() {
    let client = MockFrontendClient::new(status("fe-1", Deprecated));

    let diags = delete_frontend(&client, "fe-1");

    assert!(diags.is_empty());
    assert_eq!(client.calls(), vec!["undeprecate", "unpublish", "delete"]);
}

#[test]
fn test_delete_unpublish_failure_is_only_a_warning() {
    let client = MockFrontendClient::new(status("fe-1", Published)).failing("unpublish");

    let diags = delete_frontend(&client, "fe-1");

    assert_eq!(client.calls(), vec!["unpublish", "delete"]);
    assert!(!diags.has_errors());
    assert_eq!(diags.iter().next().unwrap().severity, Severity::Warning);
}

#[test]
fn test_delete_failure_is_an_error() {
    let client = MockFrontendClient::new(status("fe-1", Unpublished)).failing("delete");

    let diags = delete_frontend(&client, "fe-1");

    assert!(diags.has_errors());
}

// =============================================================================
// CONVERGE
// =============================================================================

#[test]
fn test_converge_replaces_frontend_when_api_changes() {
    let prior = spec(Published);
    let client = MockFrontendClient::new(status("fe-1", Published)).with_persisted(prior.clone());
    let mut desired = prior;
    desired.api_id = "backend-2".to_string();

    let diags = converge_frontend(&client, &desired);

    assert!(diags.is_empty());
    assert_eq!(client.calls(), vec!["unpublish", "delete", "create"]);
}

#[test]
fn test_converge_updates_matched_frontend() {
    let prior = spec(Published);
    let client = MockFrontendClient::new(status("fe-1", Published)).with_persisted(prior.clone());
    let mut desired = prior;
    desired.summary = "new summary".to_string();

    let diags = converge_frontend(&client, &desired);

    assert!(diags.is_empty());
    assert_eq!(client.calls(), vec!["update"]);
}

#[test]
fn test_converge_creates_unknown_frontend() {
    let client = MockFrontendClient::new(status("fe-1", Published));
    let desired = FrontendSpec::named("brand-new");

    let diags = converge_frontend(&client, &desired);

    assert!(diags.is_empty());
    assert_eq!(client.calls(), vec!["create"]);
}
