//! Record store port
//!
//! Defines the interface for top-level resources synced as whole records:
//! organizations, users, backends and applications.

use crate::core::models::ManagedRecord;

/// Remote store of one kind of record
pub trait RecordStore: Send + Sync {
    /// The record kind
    type Record: ManagedRecord;

    /// Name of the record kind, used in diagnostics (e.g. "organization")
    fn kind(&self) -> &'static str;

    /// Look up a record by its unique name
    fn find_by_name(&self, name: &str) -> anyhow::Result<Option<String>>;

    /// Fetch a record as the gateway currently holds it
    fn read(&self, id: &str) -> anyhow::Result<Self::Record>;

    /// Create a record and return its identifier
    fn create(&self, record: &Self::Record) -> anyhow::Result<String>;

    /// Push configuration changes
    fn update(&self, id: &str, record: &Self::Record) -> anyhow::Result<()>;

    /// Delete a record
    fn delete(&self, id: &str) -> anyhow::Result<()>;
}
