//! Whole-record sync
//!
//! A record is matched by its declared id, or by name. A missing record is
//! created. An existing one is read back and compared field by field: it is
//! left alone when nothing differs, replaced when a field that cannot
//! change in place differs, and updated otherwise.

use crate::core::error::SyncError;
use crate::core::models::{Diagnostic, Diagnostics, ManagedRecord};
use crate::core::ports::RecordStore;

/// Result of a record sync
#[derive(Debug, Default)]
pub struct RecordOutcome {
    /// Remote identifier, when the record exists
    pub id: Option<String>,
    /// What happened along the way
    pub diagnostics: Diagnostics,
}

impl RecordOutcome {
    fn failed(id: Option<String>, err: SyncError) -> Self {
        Self {
            id,
            diagnostics: Diagnostic::error(err).into(),
        }
    }
}

/// Find the remote identifier of a declared record
///
/// The declared id wins; otherwise the record is looked up by name.
pub fn locate_record<S>(store: &S, desired: &S::Record) -> Result<Option<String>, SyncError>
where
    S: RecordStore + ?Sized,
{
    if let Some(id) = desired.id() {
        return Ok(Some(id.to_string()));
    }
    store
        .find_by_name(desired.name())
        .map_err(|e| SyncError::remote(format!("find {}", store.kind()), desired.name(), e))
}

/// Converge a record whose remote identifier is already known (or known
/// to be absent)
pub fn push_record<S>(store: &S, existing_id: Option<&str>, desired: &S::Record) -> RecordOutcome
where
    S: RecordStore + ?Sized,
{
    let kind = store.kind();
    let Some(id) = existing_id else {
        return create_record(store, desired);
    };

    let prior = match store.read(id) {
        Ok(prior) => prior,
        Err(e) => {
            let err = SyncError::remote(format!("read {kind}"), id, e);
            return RecordOutcome::failed(Some(id.to_string()), err);
        },
    };

    let changed = prior.changed_fields(desired);
    if changed.is_empty() {
        log::debug!("{kind} {id} is up to date");
        return RecordOutcome {
            id: Some(id.to_string()),
            diagnostics: Diagnostics::new(),
        };
    }

    if changed.iter().any(|f| <S::Record as ManagedRecord>::forces_replacement(f)) {
        log::debug!("replacing {kind} {id}: {} changed", changed.join(", "));
        if let Err(e) = store.delete(id) {
            let err = SyncError::remote(format!("delete {kind}"), id, e);
            return RecordOutcome::failed(Some(id.to_string()), err);
        }
        let mut replacement = desired.clone();
        replacement.set_id(None);
        return create_record(store, &replacement);
    }

    log::debug!("updating {kind} {id}: {}", changed.join(", "));
    match store.update(id, desired) {
        Ok(()) => RecordOutcome {
            id: Some(id.to_string()),
            diagnostics: Diagnostics::new(),
        },
        Err(e) => RecordOutcome::failed(
            Some(id.to_string()),
            SyncError::remote(format!("update {kind}"), id, e),
        ),
    }
}

/// Locate a declared record, then converge it
pub fn sync_record<S>(store: &S, desired: &S::Record) -> RecordOutcome
where
    S: RecordStore + ?Sized,
{
    match locate_record(store, desired) {
        Ok(existing) => push_record(store, existing.as_deref(), desired),
        Err(err) => RecordOutcome::failed(None, err),
    }
}

/// Delete a declared record if it exists
pub fn delete_record<S>(store: &S, desired: &S::Record) -> Diagnostics
where
    S: RecordStore + ?Sized,
{
    let kind = store.kind();
    let id = match locate_record(store, desired) {
        Ok(Some(id)) => id,
        Ok(None) => {
            log::debug!("{kind} {} does not exist", desired.name());
            return Diagnostics::new();
        },
        Err(err) => return Diagnostic::error(err).into(),
    };

    log::debug!("deleting {kind} {id}");
    match store.delete(&id) {
        Ok(()) => Diagnostics::new(),
        Err(e) => Diagnostic::error(SyncError::remote(format!("delete {kind}"), id, e)).into(),
    }
}

fn create_record<S>(store: &S, desired: &S::Record) -> RecordOutcome
where
    S: RecordStore + ?Sized,
{
    let kind = store.kind();
    log::debug!("creating {kind} {}", desired.name());
    match store.create(desired) {
        Ok(id) => RecordOutcome {
            id: Some(id),
            diagnostics: Diagnostics::new(),
        },
        Err(e) => RecordOutcome::failed(
            None,
            SyncError::remote(format!("create {kind}"), desired.name(), e),
        ),
    }
}
