//! Association store port
//!
//! Defines the interface for many-to-many links between a parent resource
//! (an application) and its children (APIs, API keys).

use crate::core::models::Identified;

/// Remote store of one kind of association
pub trait AssociationStore: Send + Sync {
    /// Payload needed to create the association
    type Child: Identified;

    /// Name of the child kind, used in diagnostics (e.g. "api key")
    fn kind(&self) -> &'static str;

    /// List the identifiers of the children currently associated
    fn list(&self, parent_id: &str) -> anyhow::Result<Vec<String>>;

    /// Associate a child
    fn add(&self, parent_id: &str, child: &Self::Child) -> anyhow::Result<()>;

    /// Remove an association by child identifier
    fn remove(&self, parent_id: &str, child_id: &str) -> anyhow::Result<()>;
}
