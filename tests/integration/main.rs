//! Integration tests for the gwsync CLI
//!
//! These run the binary end to end: limit parsing, set diffs, lifecycle
//! transitions, and full plans replayed against snapshot files.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create a gwsync command with a clean environment
fn gwsync(config_home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("gwsync"));
    cmd.env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG");
    for var in ["HOST", "USERNAME", "PASSWORD", "PROXY", "SKIP_TLS_CERT_VERIF"] {
        cmd.env_remove(format!("GWSYNC_{var}"));
    }
    cmd
}

/// Helper to write a file into the temp directory
fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}

const SNAPSHOT: &str = r#"
[[application]]
id = "app-1"
name = "billing"
apis = ["api-a", "api-b"]

[[frontend]]
id = "fe-1"
name = "petstore"
path = "/pets"
state = "published"
"#;

const DESIRED: &str = r#"
[[application]]
name = "billing"
apis = ["api-b", "api-c"]

[application.quota]
[[application.quota.restriction]]
api_id = "api-b"
limit = "100 msg per 2 minutes"

[[frontend]]
name = "petstore"
path = "/v2/pets"
state = "published"
"#;

// =============================================================================
// LIMIT
// =============================================================================

#[test]
fn test_limit_prints_canonical_forms() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["limit", "100 msg per 2 minutes", "10MB/s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100msg/2minute"))
        .stdout(predicate::str::contains("10MB/1second"));
}

#[test]
fn test_limit_rejects_unknown_unit() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["limit", "10 msg per month"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("invalid:"))
        .stdout(predicate::str::contains("month"));
}

#[test]
fn test_limit_json() {
    let temp = TempDir::new().unwrap();
    let output = gwsync(temp.path())
        .args(["--json", "limit", "5 MB per hour"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["limits"][0]["canonical"], "5MB/1hour");
}

// =============================================================================
// DIFF AND TRANSITION
// =============================================================================

#[test]
fn test_diff_lists_adds_and_removes() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["diff", "--wanted", "B,C,D", "--existing", "A,B,C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ D"))
        .stdout(predicate::str::contains("- A"))
        .stdout(predicate::str::contains("+ B").not());
}

#[test]
fn test_diff_converged() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["diff", "--wanted", "A,B", "--existing", "B,A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already converged."));
}

#[test]
fn test_transition_from_deprecated() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["transition", "deprecated", "unpublished"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deprecated -> unpublished: undeprecate, unpublish"));
}

#[test]
fn test_transition_rejects_unknown_state() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["transition", "retired", "published"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid state: retired"));
}

// =============================================================================
// PLAN
// =============================================================================

#[test]
fn test_plan_against_snapshot() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);
    let observed = write(&temp, "observed.toml", SNAPSHOT);

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .assert()
        .success()
        .stdout(predicate::str::contains("add api app-1/api-c"))
        .stdout(predicate::str::contains("remove api app-1/api-a"))
        .stdout(predicate::str::contains("add quota app-1"))
        .stdout(predicate::str::contains("unpublish fe-1"))
        .stdout(predicate::str::contains("publish fe-1"))
        .stdout(predicate::str::contains("temporarily unpublished"));
}

#[test]
fn test_plan_from_empty_gateway_creates_everything() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .assert()
        .success()
        .stdout(predicate::str::contains("create application billing"))
        .stdout(predicate::str::contains("create frontend petstore"));
}

#[test]
fn test_plan_json_reports_operations() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);
    let observed = write(&temp, "observed.toml", SNAPSHOT);

    let output = gwsync(temp.path())
        .arg("--json")
        .arg("plan")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["errors"], 0);
    assert_eq!(json["operations"][0]["action"], "add api");
    assert_eq!(json["operations"][0]["target"], "app-1/api-c");
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_plan_against_converged_snapshot_makes_no_calls() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);
    // the declared state, as the gateway stores it
    let observed = write(
        &temp,
        "observed.toml",
        r#"
[[application]]
id = "app-1"
name = "billing"
apis = ["api-c", "api-b"]

[application.quota]
id = "quota-1"
name = "quota for billing"

[[application.quota.restriction]]
api_id = "api-b"
method = "*"
limit_kind = "throttle"
limit_amount = 100
period_amount = 2
period_unit = "minutes"

[[frontend]]
id = "fe-1"
name = "petstore"
path = "/v2/pets"
state = "published"
"#,
    );

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .assert()
        .success()
        .stdout(predicate::str::diff("No changes.\n"));
}

#[test]
fn test_plan_destroy_deletes_declared_resources() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);
    let observed = write(&temp, "observed.toml", SNAPSHOT);

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .arg("--destroy")
        .assert()
        .success()
        .stdout(predicate::str::contains("unpublish fe-1"))
        .stdout(predicate::str::contains("delete frontend fe-1"))
        .stdout(predicate::str::contains("delete application app-1"))
        .stdout(predicate::str::contains("add api").not());
}

#[test]
fn test_plan_records_from_empty_gateway() {
    let temp = TempDir::new().unwrap();
    let desired = write(
        &temp,
        "desired.toml",
        r#"
[[organization]]
name = "acme"

[[user]]
login_name = "jdoe"
main_role = { org_id = "org-1", role = "oadmin" }

[[backend]]
org_id = "org-1"
name = "petstore"
"#,
    );

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .assert()
        .success()
        .stdout(predicate::str::contains("create organization acme"))
        .stdout(predicate::str::contains("create user jdoe"))
        .stdout(predicate::str::contains("create backend petstore"));
}

#[test]
fn test_plan_failure_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let desired = write(&temp, "desired.toml", DESIRED);
    let observed = write(
        &temp,
        "observed.toml",
        &format!("fail = [\"publish fe-1\"]\n{SNAPSHOT}"),
    );

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .arg("--observed")
        .arg(&observed)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("publish fe-1 (failed)"))
        .stdout(predicate::str::contains("FAILED: 1 error(s)"));
}

#[test]
fn test_plan_rejects_duplicate_names() {
    let temp = TempDir::new().unwrap();
    let desired = write(
        &temp,
        "desired.toml",
        "[[frontend]]\nname = \"a\"\n\n[[frontend]]\nname = \"a\"\n",
    );

    gwsync(temp.path())
        .arg("plan")
        .arg(&desired)
        .assert()
        .failure()
        .stderr(predicate::str::contains("declared twice"));
}

// =============================================================================
// CONFIG AND VERSION
// =============================================================================

#[test]
fn test_config_check_without_credentials_fails() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["config", "--check"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("missing username and/or password"));
}

#[test]
fn test_config_check_with_env_credentials() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .args(["config", "--check"])
        .env("GWSYNC_USERNAME", "admin")
        .env("GWSYNC_PASSWORD", "s3cret")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid."))
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    gwsync(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("gwsync v{}", env!("CARGO_PKG_VERSION"))));
}
