//! Quota store port

use crate::core::models::Quota;

/// Remote storage of application quotas
pub trait QuotaStore: Send + Sync {
    /// Fetch the quota applying to an application
    ///
    /// May return the gateway's system quota when none was set up.
    fn application_quota(&self, application_id: &str) -> anyhow::Result<Option<Quota>>;

    /// Attach a new quota to an application
    fn add_application_quota(&self, application_id: &str, quota: &Quota) -> anyhow::Result<()>;

    /// Replace the application's quota
    fn update_application_quota(&self, application_id: &str, quota: &Quota)
    -> anyhow::Result<()>;

    /// Remove the application's quota
    fn delete_application_quota(&self, application_id: &str) -> anyhow::Result<()>;
}
