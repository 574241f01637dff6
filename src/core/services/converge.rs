//! Whole-document convergence
//!
//! Matches every declared resource with its remote counterpart and runs the
//! matching sync flow. Resources are independent: a failure on one never
//! stops the next.

use crate::core::error::SyncError;
use crate::core::models::{
    BackendSpec, DesiredState, Diagnostic, Diagnostics, FrontendField, FrontendSpec,
    OrganizationSpec, UserSpec,
};
use crate::core::ports::{FrontendClient, RecordStore};

use super::application::{ApplicationStores, sync_application};
use super::frontend::{create_frontend, delete_frontend, update_frontend};
use super::record::{delete_record, locate_record, sync_record};

/// Every remote surface a declared-state document touches
#[derive(Clone, Copy)]
pub struct Gateway<'a> {
    /// Organization records
    pub organizations: &'a dyn RecordStore<Record = OrganizationSpec>,
    /// User records
    pub users: &'a dyn RecordStore<Record = UserSpec>,
    /// Backend API records
    pub backends: &'a dyn RecordStore<Record = BackendSpec>,
    /// Application stores
    pub applications: ApplicationStores<'a>,
    /// Frontend client
    pub frontends: &'a dyn FrontendClient,
}

impl std::fmt::Debug for Gateway<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

/// Converge the gateway to a declared-state document
///
/// Organizations go first, then users, backends, applications and
/// frontends, each in document order.
pub fn converge(gateway: &Gateway<'_>, desired: &DesiredState) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for spec in &desired.organizations {
        diagnostics.extend(sync_record(gateway.organizations, spec).diagnostics);
    }
    for spec in &desired.users {
        diagnostics.extend(sync_record(gateway.users, spec).diagnostics);
    }
    for spec in &desired.backends {
        diagnostics.extend(sync_record(gateway.backends, spec).diagnostics);
    }

    for spec in &desired.applications {
        let existing = match locate_record(gateway.applications.applications, spec) {
            Ok(existing) => existing,
            Err(err) => {
                diagnostics.error(err);
                continue;
            },
        };
        let outcome = sync_application(gateway.applications, spec, existing.as_deref());
        diagnostics.extend(outcome.diagnostics);
    }

    for spec in &desired.frontends {
        diagnostics.extend(converge_frontend(gateway.frontends, spec));
    }

    diagnostics
}

/// Delete every resource a declared-state document names
///
/// Resources are removed in the reverse of the [`converge`] order so
/// nothing is deleted while something declared after it still refers to
/// it. Resources that do not exist are skipped.
pub fn destroy(gateway: &Gateway<'_>, desired: &DesiredState) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for spec in desired.frontends.iter().rev() {
        diagnostics.extend(destroy_frontend(gateway.frontends, spec));
    }
    for spec in desired.applications.iter().rev() {
        diagnostics.extend(delete_record(gateway.applications.applications, spec));
    }
    for spec in desired.backends.iter().rev() {
        diagnostics.extend(delete_record(gateway.backends, spec));
    }
    for spec in desired.users.iter().rev() {
        diagnostics.extend(delete_record(gateway.users, spec));
    }
    for spec in desired.organizations.iter().rev() {
        diagnostics.extend(delete_record(gateway.organizations, spec));
    }

    diagnostics
}

fn destroy_frontend<C>(client: &C, desired: &FrontendSpec) -> Diagnostics
where
    C: FrontendClient + ?Sized,
{
    match locate_frontend(client, desired) {
        Ok(Some(id)) => delete_frontend(client, &id),
        Ok(None) => {
            log::debug!("frontend {} does not exist", desired.name);
            Diagnostics::new()
        },
        Err(err) => Diagnostic::error(err).into(),
    }
}

fn locate_frontend<C>(client: &C, desired: &FrontendSpec) -> Result<Option<String>, SyncError>
where
    C: FrontendClient + ?Sized,
{
    match &desired.id {
        Some(id) => Ok(Some(id.clone())),
        None => client
            .find_by_name(&desired.name)
            .map_err(|e| SyncError::remote("find frontend", &desired.name, e)),
    }
}

/// Create, replace or update a single frontend
pub fn converge_frontend<C>(client: &C, desired: &FrontendSpec) -> Diagnostics
where
    C: FrontendClient + ?Sized,
{
    let existing = match locate_frontend(client, desired) {
        Ok(existing) => existing,
        Err(err) => return Diagnostic::error(err).into(),
    };

    let Some(id) = existing else {
        return create_frontend(client, desired).diagnostics;
    };

    let prior = match client.read(&id) {
        Ok(prior) => prior,
        Err(e) => return Diagnostic::error(SyncError::remote("read frontend", &id, e)).into(),
    };

    let replaced: Vec<FrontendField> = prior
        .changed_fields(desired)
        .into_iter()
        .filter(|f| f.forces_replacement())
        .collect();
    if replaced.is_empty() {
        return update_frontend(client, &id, &prior, desired).diagnostics;
    }

    log::debug!(
        "replacing frontend {id}: {} changed",
        replaced.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    let mut diagnostics = delete_frontend(client, &id);
    if diagnostics.has_errors() {
        return diagnostics;
    }
    let mut replacement = desired.clone();
    replacement.id = None;
    diagnostics.extend(create_frontend(client, &replacement).diagnostics);
    diagnostics
}
