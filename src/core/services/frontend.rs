//! Frontend create, update and delete flows
//!
//! Published and deprecated frontends only accept changes to their
//! descriptive fields. Any other change requires the frontend to be
//! temporarily unpublished, updated, then walked back to its declared
//! state.

use crate::core::error::SyncError;
use crate::core::models::{
    Diagnostic, Diagnostics, FrontendField, FrontendSpec, FrontendStatus, LifecycleState,
};
use crate::core::ports::FrontendClient;

use super::lifecycle::{apply_transition, current_state};

/// Result of a frontend flow
#[derive(Debug, Default)]
pub struct FrontendOutcome {
    /// Last known remote status, when the frontend still exists
    pub status: Option<FrontendStatus>,
    /// What happened along the way
    pub diagnostics: Diagnostics,
}

impl FrontendOutcome {
    const fn new(status: Option<FrontendStatus>, diagnostics: Diagnostics) -> Self {
        Self {
            status,
            diagnostics,
        }
    }
}

/// Whether applying `changed` requires unpublishing a frontend currently
/// in `current`
#[must_use]
pub fn must_unpublish(current: Option<LifecycleState>, changed: &[FrontendField]) -> bool {
    current != Some(LifecycleState::Unpublished) && changed.iter().any(|f| !f.is_live_editable())
}

/// Create a frontend directly in its declared state
pub fn create_frontend<C>(client: &C, desired: &FrontendSpec) -> FrontendOutcome
where
    C: FrontendClient + ?Sized,
{
    let mut diagnostics = Diagnostics::new();
    log::debug!("creating frontend {} ({})", desired.name, desired.state);
    match client.create(desired) {
        Ok(status) => FrontendOutcome::new(Some(status), diagnostics),
        Err(e) => {
            diagnostics.error(SyncError::remote("create frontend", &desired.name, e));
            FrontendOutcome::new(None, diagnostics)
        },
    }
}

/// Update a frontend from its persisted spec `prior` to `desired`
///
/// 1. If the frontend is not unpublished and a change touches a field that
///    cannot change while published, unpublish it first (with a warning).
/// 2. Push the configuration change, if any.
/// 3. Walk the frontend to its declared state.
///
/// Failures in steps 1 and 2 abort the flow.
pub fn update_frontend<C>(
    client: &C,
    id: &str,
    prior: &FrontendSpec,
    desired: &FrontendSpec,
) -> FrontendOutcome
where
    C: FrontendClient + ?Sized,
{
    let mut diagnostics = Diagnostics::new();

    let mut status = match client.get(id) {
        Ok(status) => status,
        Err(e) => {
            diagnostics.error(SyncError::remote("get frontend", id, e));
            return FrontendOutcome::new(None, diagnostics);
        },
    };

    let changed: Vec<FrontendField> = prior
        .changed_fields(desired)
        .into_iter()
        .filter(|f| *f != FrontendField::State)
        .collect();

    if must_unpublish(current_state(&status), &changed) {
        let walk = apply_transition(client, &mut status, LifecycleState::Unpublished);
        let failed = walk.has_errors();
        diagnostics.extend(walk);
        if failed {
            return FrontendOutcome::new(Some(status), diagnostics);
        }
        if current_state(&status) == Some(LifecycleState::Unpublished) {
            diagnostics.warn(format!(
                "The api {} has been temporarily unpublished to allow some changes",
                status.name
            ));
        }
    }

    if !changed.is_empty() {
        log::debug!(
            "updating frontend {id}: {}",
            changed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        match client.update(id, desired) {
            Ok(refreshed) => status = refreshed,
            Err(e) => {
                diagnostics.error(SyncError::remote("update frontend", id, e));
                return FrontendOutcome::new(Some(status), diagnostics);
            },
        }
    }

    diagnostics.extend(apply_transition(client, &mut status, desired.state));
    FrontendOutcome::new(Some(status), diagnostics)
}

/// Delete a frontend, unpublishing it first if needed
///
/// The unpublish walk is best effort: its failures are reported as
/// warnings and the delete is still attempted.
pub fn delete_frontend<C>(client: &C, id: &str) -> Diagnostics
where
    C: FrontendClient + ?Sized,
{
    let mut diagnostics = Diagnostics::new();

    match client.get(id) {
        Ok(mut status) => {
            if current_state(&status) != Some(LifecycleState::Unpublished) {
                let walk = apply_transition(client, &mut status, LifecycleState::Unpublished);
                if walk.has_errors() {
                    log::warn!("could not unpublish frontend {id} before deleting it");
                }
                diagnostics.extend(walk.downgrade_errors());
            }
        },
        Err(e) => {
            diagnostics.push(Diagnostic::warning_from(SyncError::remote("get frontend", id, e)));
        },
    }

    log::debug!("deleting frontend {id}");
    if let Err(e) = client.delete(id) {
        diagnostics.error(SyncError::remote("delete frontend", id, e));
    }
    diagnostics
}
