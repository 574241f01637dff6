//! Top-level gateway records
//!
//! Organizations, users, backends and applications are each synced as a
//! whole record: found by name, read back, compared field by field, and
//! only pushed when something differs.

/// A resource the gateway stores as a single record
pub trait ManagedRecord: Clone + Send + Sync {
    /// Remote identifier, when known
    fn id(&self) -> Option<&str>;

    /// Record (or forget) the remote identifier
    fn set_id(&mut self, id: Option<String>);

    /// Unique name the record is matched by
    fn name(&self) -> &str;

    /// Configuration keys whose value differs in `desired`
    ///
    /// Identifiers and write-only fields never count as a change.
    fn changed_fields(&self, desired: &Self) -> Vec<&'static str>;

    /// Whether changing `field` requires destroying and recreating the record
    fn forces_replacement(_field: &str) -> bool {
        false
    }

    /// The record as the gateway reports it back, without write-only fields
    #[must_use]
    fn without_secrets(&self) -> Self {
        self.clone()
    }
}

/// Collect the keys of the fields flagged as changed
pub(super) fn changed<const N: usize>(checks: [(&'static str, bool); N]) -> Vec<&'static str> {
    checks.into_iter().filter(|(_, changed)| *changed).map(|(key, _)| key).collect()
}
