//! Plan command - replay declared state against a gateway snapshot

use std::path::Path;

use gwsync::adapters::memory::{GatewaySnapshot, MemoryGateway};
use gwsync::adapters::toml::load_desired;
use gwsync::core::services::{ApplicationStores, Gateway, converge, destroy};
use gwsync::output::{OutputMode, PlanResult};

/// Converge an in-memory copy of the gateway and report every call made
///
/// Without a snapshot the gateway starts empty. With `teardown`, every
/// declared resource is deleted instead. Exits with status 1 if the replay
/// reported errors.
pub fn plan(
    desired: &Path,
    observed: Option<&Path>,
    teardown: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let desired = load_desired(desired)?;
    let snapshot = match observed {
        Some(path) => GatewaySnapshot::load(path)?,
        None => GatewaySnapshot::default(),
    };
    let gateway = MemoryGateway::from_snapshot(snapshot)?;

    let organizations = gateway.organizations();
    let users = gateway.users();
    let backends = gateway.backends();
    let applications = gateway.applications();
    let apis = gateway.apis();
    let api_keys = gateway.api_keys();
    let target = Gateway {
        organizations: &organizations,
        users: &users,
        backends: &backends,
        applications: ApplicationStores {
            applications: &applications,
            apis: &apis,
            api_keys: &api_keys,
            quotas: &gateway,
        },
        frontends: &gateway,
    };
    let diagnostics = if teardown {
        destroy(&target, &desired)
    } else {
        converge(&target, &desired)
    };

    let result = PlanResult::new(gateway.journal(), &diagnostics);
    result.render(mode);

    if diagnostics.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
