//! TOML parser for declared-state files
//!
//! Handles reading and deserializing `desired.toml` documents. Limit
//! strings are validated while deserializing, so a document that loads is
//! a document whose every quota can be expanded.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::models::{DesiredState, ManagedRecord};

/// Parse a declared-state document
///
/// # Errors
///
/// Returns an error if the TOML is malformed or a limit does not parse.
pub fn parse_desired(content: &str) -> anyhow::Result<DesiredState> {
    let desired: DesiredState = toml::from_str(content)?;
    check_unique_names(&desired)?;
    Ok(desired)
}

/// Load a declared-state file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_desired(path: &Path) -> anyhow::Result<DesiredState> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let desired = parse_desired(&content)
        .map_err(|e| anyhow::anyhow!("invalid declared state in {}: {e}", path.display()))?;
    log::debug!(
        "loaded {} organization(s), {} user(s), {} backend(s), {} application(s) and {} frontend(s) from {}",
        desired.organizations.len(),
        desired.users.len(),
        desired.backends.len(),
        desired.applications.len(),
        desired.frontends.len(),
        path.display()
    );
    Ok(desired)
}

/// Resources are matched by name: two declarations of the same name would
/// fight over one remote resource
fn check_unique_names(desired: &DesiredState) -> anyhow::Result<()> {
    unique_records("organization", &desired.organizations)?;
    unique_records("user", &desired.users)?;
    unique_records("backend", &desired.backends)?;
    unique_records("application", &desired.applications)?;
    let mut seen = HashSet::new();
    for frontend in &desired.frontends {
        if !seen.insert(frontend.name.as_str()) {
            anyhow::bail!("frontend {} is declared twice", frontend.name);
        }
    }
    Ok(())
}

fn unique_records<R: ManagedRecord>(kind: &str, records: &[R]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.name()) {
            anyhow::bail!("{kind} {} is declared twice", record.name());
        }
    }
    Ok(())
}
