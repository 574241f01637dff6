//! Set reconciliation
//!
//! Computes the minimal add/remove operations that turn an existing set of
//! identifiers into a wanted one, and drives them through an
//! [`AssociationStore`].

use std::collections::BTreeSet;

use crate::core::error::SyncError;
use crate::core::models::{Diagnostics, Identified};
use crate::core::ports::AssociationStore;

/// Result of reconciling two identifier sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Wanted but missing
    pub to_add: BTreeSet<String>,
    /// Present but no longer wanted
    pub to_remove: BTreeSet<String>,
    /// Present and wanted: left untouched
    pub unchanged: BTreeSet<String>,
}

impl Reconciliation {
    /// Check if nothing has to change
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Reconcile a wanted set of identifiers against an existing one
///
/// This is pure: `to_add = wanted - existing`, `to_remove = existing - wanted`.
/// Members of both sets are reported as unchanged and never churned.
#[must_use]
pub fn reconcile(wanted: &BTreeSet<String>, existing: &BTreeSet<String>) -> Reconciliation {
    Reconciliation {
        to_add: wanted.difference(existing).cloned().collect(),
        to_remove: existing.difference(wanted).cloned().collect(),
        unchanged: wanted.intersection(existing).cloned().collect(),
    }
}

/// Converge the children associated with `parent_id` to `wanted`
///
/// Every add and remove is attempted even when some fail; each failure is
/// reported. A failure to list the existing children aborts this set only.
pub fn sync_associations<S>(store: &S, parent_id: &str, wanted: &[S::Child]) -> Diagnostics
where
    S: AssociationStore + ?Sized,
{
    let mut diags = Diagnostics::new();
    let kind = store.kind();

    let existing: BTreeSet<String> = match store.list(parent_id) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            diags.error(SyncError::remote(format!("list {kind}s"), parent_id, e));
            return diags;
        },
    };
    let wanted_ids: BTreeSet<String> = wanted.iter().map(|c| c.id().to_string()).collect();
    let plan = reconcile(&wanted_ids, &existing);

    log::debug!(
        "{kind}s of {parent_id}: {} to add, {} to remove, {} unchanged",
        plan.to_add.len(),
        plan.to_remove.len(),
        plan.unchanged.len()
    );

    for id in &plan.to_add {
        // first declaration wins when an id is repeated
        let Some(child) = wanted.iter().find(|c| c.id() == id) else {
            continue;
        };
        if let Err(e) = store.add(parent_id, child) {
            diags.error(SyncError::remote(format!("add {kind} {id}"), parent_id, e));
        }
    }
    for id in &plan.to_remove {
        if let Err(e) = store.remove(parent_id, id) {
            diags.error(SyncError::remote(format!("remove {kind} {id}"), parent_id, e));
        }
    }

    diags
}
