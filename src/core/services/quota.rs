//! Application quota sync

use crate::core::error::SyncError;
use crate::core::models::{Diagnostics, Quota, QuotaSpec};
use crate::core::ports::QuotaStore;

/// Converge the quota of an application to `wanted`
///
/// A declared quota is added, or replaces the application's own quota if it
/// has one (a system default quota does not count) and that quota differs.
/// Without a declaration, the application's own quota is deleted.
pub fn sync_quota<S>(
    store: &S,
    application_id: &str,
    application_name: &str,
    wanted: Option<&QuotaSpec>,
) -> Diagnostics
where
    S: QuotaStore + ?Sized,
{
    let mut diags = Diagnostics::new();

    let existing = match store.application_quota(application_id) {
        Ok(quota) => quota.filter(Quota::is_custom),
        Err(e) => {
            diags.error(SyncError::remote("get quota", application_id, e));
            return diags;
        },
    };

    let result = match (wanted, existing) {
        (Some(spec), Some(existing)) => {
            let quota = Quota::for_application(application_name, spec);
            if existing.matches(&quota) {
                log::debug!("quota of application {application_id} is up to date");
                Ok(())
            } else {
                log::debug!("updating quota of application {application_id}");
                store
                    .update_application_quota(application_id, &quota)
                    .map_err(|e| SyncError::remote("update quota", application_id, e))
            }
        },
        (Some(spec), None) => {
            log::debug!("adding quota to application {application_id}");
            let quota = Quota::for_application(application_name, spec);
            store
                .add_application_quota(application_id, &quota)
                .map_err(|e| SyncError::remote("add quota", application_id, e))
        },
        (None, Some(_)) => {
            log::debug!("removing quota of application {application_id}");
            store
                .delete_application_quota(application_id)
                .map_err(|e| SyncError::remote("delete quota", application_id, e))
        },
        (None, None) => Ok(()),
    };

    if let Err(e) = result {
        diags.error(e);
    }
    diags
}
