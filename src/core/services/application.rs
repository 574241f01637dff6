//! Application sync
//!
//! An application record is converged first, then its API associations,
//! its API keys and its quota are converged independently of each other.

use crate::core::models::{ApiKeySpec, ApplicationSpec, Diagnostics};
use crate::core::ports::{AssociationStore, QuotaStore, RecordStore};

use super::quota::sync_quota;
use super::reconciler::sync_associations;
use super::record::push_record;

/// The remote stores an application sync talks to
#[derive(Clone, Copy)]
pub struct ApplicationStores<'a> {
    /// Application records
    pub applications: &'a dyn RecordStore<Record = ApplicationSpec>,
    /// Application to API links
    pub apis: &'a dyn AssociationStore<Child = String>,
    /// API keys held by applications
    pub api_keys: &'a dyn AssociationStore<Child = ApiKeySpec>,
    /// Application quotas
    pub quotas: &'a dyn QuotaStore,
}

impl std::fmt::Debug for ApplicationStores<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationStores").finish_non_exhaustive()
    }
}

/// Result of an application sync
#[derive(Debug, Default)]
pub struct ApplicationOutcome {
    /// Remote identifier, when the application exists
    pub id: Option<String>,
    /// What happened along the way
    pub diagnostics: Diagnostics,
}

/// Create or update an application, then converge everything attached to it
///
/// `existing_id` is the remote identifier of the application, if it already
/// exists. The record is only pushed when one of its own fields differs
/// from the remote one. A failure to read, create, update or replace the
/// application itself stops the sync; failures on its associations and
/// quota are all collected.
pub fn sync_application(
    stores: ApplicationStores<'_>,
    spec: &ApplicationSpec,
    existing_id: Option<&str>,
) -> ApplicationOutcome {
    let record = push_record(stores.applications, existing_id, spec);
    let mut diagnostics = record.diagnostics;
    let id = match record.id {
        Some(id) if !diagnostics.has_errors() => id,
        id => return ApplicationOutcome { id, diagnostics },
    };

    diagnostics.extend(sync_associations(stores.apis, &id, &spec.apis));
    diagnostics.extend(sync_associations(stores.api_keys, &id, &spec.api_keys));
    diagnostics.extend(sync_quota(stores.quotas, &id, &spec.name, spec.quota.as_ref()));

    ApplicationOutcome {
        id: Some(id),
        diagnostics,
    }
}
