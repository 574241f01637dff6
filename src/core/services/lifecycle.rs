//! Frontend lifecycle transitions
//!
//! A frontend moves between unpublished, published and deprecated through
//! a fixed table of remote calls:
//!
//! | current     | target      | calls                  |
//! |-------------|-------------|------------------------|
//! | unpublished | published   | publish                |
//! | unpublished | deprecated  | publish, deprecate     |
//! | published   | unpublished | unpublish              |
//! | published   | deprecated  | deprecate              |
//! | deprecated  | published   | undeprecate            |
//! | deprecated  | unpublished | undeprecate, unpublish |
//!
//! Staying in the same state needs no call. A remote state outside the
//! lifecycle (e.g. `pending`) is reported as a warning and left alone.

use crate::core::error::SyncError;
use crate::core::models::{
    Diagnostic, Diagnostics, FrontendStatus, LifecycleOp, LifecycleState,
};
use crate::core::ports::FrontendClient;

/// The remote calls needed to go from `current` to `target`, in order
#[must_use]
pub fn plan_transition(current: LifecycleState, target: LifecycleState) -> Vec<LifecycleOp> {
    use crate::core::models::LifecycleOp::{Deprecate, Publish, Undeprecate, Unpublish};
    use crate::core::models::LifecycleState::{Deprecated, Published, Unpublished};

    match (current, target) {
        (Unpublished, Published) => vec![Publish],
        (Unpublished, Deprecated) => vec![Publish, Deprecate],
        (Published, Unpublished) => vec![Unpublish],
        (Published, Deprecated) => vec![Deprecate],
        (Deprecated, Published) => vec![Undeprecate],
        (Deprecated, Unpublished) => vec![Undeprecate, Unpublish],
        (Unpublished, Unpublished) | (Published, Published) | (Deprecated, Deprecated) => {
            Vec::new()
        },
    }
}

/// Fold a remote status into its lifecycle state
///
/// Logs a warning when the gateway reports a deprecated frontend that is
/// not published.
#[must_use]
pub fn current_state(status: &FrontendStatus) -> Option<LifecycleState> {
    if status.is_inconsistent() {
        log::warn!(
            "frontend {} is deprecated but {}: treating it as {}",
            status.id,
            status.state,
            LifecycleState::Unpublished
        );
    }
    status.lifecycle()
}

/// Walk a frontend from its current state to `target`
///
/// `status` is refreshed after every successful call. The first failing
/// call aborts the remaining ones and is reported as an error; nothing is
/// raised. An unsupported current state is reported as a warning.
pub fn apply_transition<C>(
    client: &C,
    status: &mut FrontendStatus,
    target: LifecycleState,
) -> Diagnostics
where
    C: FrontendClient + ?Sized,
{
    let mut diags = Diagnostics::new();

    let Some(from) = current_state(status) else {
        let err = SyncError::UnsupportedTransition {
            frontend: status.id.clone(),
            from: status.state.to_string(),
            to: target,
        };
        log::warn!("{err}");
        diags.push(Diagnostic::warning_from(err));
        return diags;
    };

    for operation in plan_transition(from, target) {
        log::debug!("{operation} frontend {} ({from} -> {target})", status.id);
        match client.apply(operation, &status.id) {
            Ok(refreshed) => *status = refreshed,
            Err(source) => {
                diags.error(SyncError::Transition {
                    frontend: status.id.clone(),
                    from,
                    to: target,
                    operation,
                    source,
                });
                break;
            },
        }
    }

    diags
}
