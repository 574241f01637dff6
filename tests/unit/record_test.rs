//! Tests for whole-record sync of organizations, users and backends

use gwsync::adapters::memory::{GatewaySnapshot, MemoryGateway};
use gwsync::core::models::{BackendSpec, OrganizationSpec, UserSpec};
use gwsync::core::ports::RecordStore;
use gwsync::core::services::{delete_record, locate_record, sync_record};

const SNAPSHOT: &str = r#"
[[organization]]
id = "org-1"
name = "acme"
email = "ops@acme.test"

[[user]]
id = "user-1"
login_name = "jdoe"
name = "Jane Doe"
main_role = { org_id = "org-1", role = "user" }

[[backend]]
id = "backend-1"
org_id = "org-1"
name = "petstore"
swagger = "{}"
"#;

fn gateway() -> MemoryGateway {
    MemoryGateway::from_snapshot(GatewaySnapshot::from_toml(SNAPSHOT).unwrap()).unwrap()
}

fn acme() -> OrganizationSpec {
    let mut org = OrganizationSpec::named("acme");
    org.email = "ops@acme.test".to_string();
    org
}

fn petstore() -> BackendSpec {
    let mut backend = BackendSpec::named("petstore");
    backend.org_id = "org-1".to_string();
    backend.swagger = "{}".to_string();
    backend
}

fn journal(gw: &MemoryGateway) -> Vec<String> {
    gw.journal().iter().map(ToString::to_string).collect()
}

// =============================================================================
// SYNC
// =============================================================================

#[test]
fn test_unknown_record_is_created() {
    let gw = MemoryGateway::new();

    let outcome = sync_record(&gw.organizations(), &acme());

    assert!(outcome.diagnostics.is_empty());
    let id = outcome.id.unwrap();
    assert_eq!(journal(&gw), vec!["create organization acme"]);
    assert_eq!(gw.organizations().read(&id).unwrap().email, "ops@acme.test");
}

#[test]
fn test_matching_record_is_left_alone() {
    let gw = gateway();

    let outcome = sync_record(&gw.organizations(), &acme());

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.id.as_deref(), Some("org-1"));
    assert!(gw.journal().is_empty());
}

#[test]
fn test_changed_record_is_updated_in_place() {
    let gw = gateway();
    let mut org = acme();
    org.development = true;

    let outcome = sync_record(&gw.organizations(), &org);

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(journal(&gw), vec!["update organization org-1"]);
    assert!(gw.organizations().read("org-1").unwrap().development);
}

#[test]
fn test_declared_id_wins_over_name() {
    let gw = gateway();
    let mut org = acme();
    org.id = Some("org-1".to_string());
    org.name = "acme corp".to_string();

    let outcome = sync_record(&gw.organizations(), &org);

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(journal(&gw), vec!["update organization org-1"]);
    assert_eq!(gw.organizations().read("org-1").unwrap().name, "acme corp");
}

#[test]
fn test_new_definition_replaces_backend() {
    let gw = gateway();
    let mut backend = petstore();
    backend.swagger = r#"{"swagger": "2.0"}"#.to_string();

    let outcome = sync_record(&gw.backends(), &backend);

    assert!(outcome.diagnostics.is_empty());
    let id = outcome.id.unwrap();
    assert_ne!(id, "backend-1");
    assert_eq!(journal(&gw), vec!["delete backend backend-1", "create backend petstore"]);
}

#[test]
fn test_descriptive_change_keeps_backend() {
    let gw = gateway();
    let mut backend = petstore();
    backend.summary = "Pets".to_string();

    let outcome = sync_record(&gw.backends(), &backend);

    assert_eq!(outcome.id.as_deref(), Some("backend-1"));
    assert_eq!(journal(&gw), vec!["update backend backend-1"]);
}

#[test]
fn test_password_alone_does_not_update_user() {
    let gw = gateway();
    let mut user = UserSpec::with_login("jdoe");
    user.name = "Jane Doe".to_string();
    user.main_role.org_id = "org-1".to_string();
    user.main_role.role = "user".to_string();
    user.password = Some("rotated".to_string());

    let outcome = sync_record(&gw.users(), &user);

    assert!(outcome.diagnostics.is_empty());
    assert!(gw.journal().is_empty());
}

#[test]
fn test_role_change_updates_user() {
    let gw = gateway();
    let mut user = UserSpec::with_login("jdoe");
    user.name = "Jane Doe".to_string();
    user.main_role.org_id = "org-1".to_string();
    user.main_role.role = "oadmin".to_string();

    sync_record(&gw.users(), &user);

    assert_eq!(journal(&gw), vec!["update user user-1"]);
    assert_eq!(gw.users().read("user-1").unwrap().main_role.role, "oadmin");
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_lookup_failure_is_reported() {
    let gw = gateway().failing("find organization");

    let outcome = sync_record(&gw.organizations(), &acme());

    assert_eq!(outcome.id, None);
    let error = outcome.diagnostics.errors().next().unwrap();
    assert!(error.summary.contains("find organization failed for acme"), "{}", error.summary);
}

#[test]
fn test_read_failure_stops_before_update() {
    let gw = gateway().failing("read organization org-1");
    let mut org = acme();
    org.development = true;

    let outcome = sync_record(&gw.organizations(), &org);

    assert!(outcome.diagnostics.has_errors());
    assert_eq!(outcome.id.as_deref(), Some("org-1"));
    assert!(gw.journal().is_empty());
}

#[test]
fn test_failed_delete_stops_replacement() {
    let gw = gateway().failing("delete backend");
    let mut backend = petstore();
    backend.org_id = "org-2".to_string();

    let outcome = sync_record(&gw.backends(), &backend);

    assert!(outcome.diagnostics.has_errors());
    assert_eq!(journal(&gw), vec!["delete backend backend-1 (failed)"]);
}

#[test]
fn test_create_failure_is_reported() {
    let gw = MemoryGateway::new().failing("create user");

    let outcome = sync_record(&gw.users(), &UserSpec::with_login("jdoe"));

    assert_eq!(outcome.id, None);
    assert_eq!(outcome.diagnostics.errors().count(), 1);
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete_existing_record() {
    let gw = gateway();

    let diags = delete_record(&gw.backends(), &petstore());

    assert!(diags.is_empty());
    assert_eq!(locate_record(&gw.backends(), &petstore()).unwrap(), None);
}

#[test]
fn test_delete_missing_record_makes_no_call() {
    let gw = gateway();

    let diags = delete_record(&gw.organizations(), &OrganizationSpec::named("globex"));

    assert!(diags.is_empty());
    assert!(gw.journal().is_empty());
}

#[test]
fn test_delete_failure_is_reported() {
    let gw = gateway().failing("delete user user-1");

    let diags = delete_record(&gw.users(), &UserSpec::with_login("jdoe"));

    assert!(diags.has_errors());
}
