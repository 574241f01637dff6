//! Frontend client port
//!
//! Defines the remote calls available on frontends.

use crate::core::models::{FrontendSpec, FrontendStatus, LifecycleOp};

/// Remote operations on frontends
///
/// Every lifecycle call returns the refreshed status of the frontend.
pub trait FrontendClient: Send + Sync {
    /// Fetch the current status
    fn get(&self, id: &str) -> anyhow::Result<FrontendStatus>;

    /// Read the configuration as last persisted remotely
    fn read(&self, id: &str) -> anyhow::Result<FrontendSpec>;

    /// Look up a frontend by name
    fn find_by_name(&self, name: &str) -> anyhow::Result<Option<String>>;

    /// Create a frontend in the spec's declared state
    fn create(&self, spec: &FrontendSpec) -> anyhow::Result<FrontendStatus>;

    /// Push configuration changes
    fn update(&self, id: &str, spec: &FrontendSpec) -> anyhow::Result<FrontendStatus>;

    /// Delete an unpublished frontend
    fn delete(&self, id: &str) -> anyhow::Result<()>;

    /// Publish an unpublished frontend
    fn publish(&self, id: &str) -> anyhow::Result<FrontendStatus>;

    /// Unpublish a published frontend
    fn unpublish(&self, id: &str) -> anyhow::Result<FrontendStatus>;

    /// Deprecate a published frontend
    fn deprecate(&self, id: &str) -> anyhow::Result<FrontendStatus>;

    /// Clear the deprecation of a frontend
    fn undeprecate(&self, id: &str) -> anyhow::Result<FrontendStatus>;

    /// Run a single lifecycle call
    fn apply(&self, op: LifecycleOp, id: &str) -> anyhow::Result<FrontendStatus> {
        match op {
            LifecycleOp::Publish => self.publish(id),
            LifecycleOp::Unpublish => self.unpublish(id),
            LifecycleOp::Deprecate => self.deprecate(id),
            LifecycleOp::Undeprecate => self.undeprecate(id),
        }
    }
}
