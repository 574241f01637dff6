//! Errors raised while converging remote state to declared state

use thiserror::Error;

use super::models::{ConstraintError, LifecycleOp, LifecycleState, ParseError};

/// A failure encountered while syncing one resource
#[derive(Debug, Error)]
pub enum SyncError {
    /// A declared limit could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A remote constraint could not be understood
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// A remote call failed
    #[error("{operation} failed for {target}: {source:#}")]
    RemoteOperation {
        /// What was attempted, e.g. `add api`
        operation: String,
        /// The resource it was attempted on
        target: String,
        /// Cause reported by the remote client
        source: anyhow::Error,
    },

    /// A lifecycle call failed part-way through a transition
    #[error("transition {from} -> {to} of frontend {frontend} failed at {operation}: {source:#}")]
    Transition {
        /// Frontend identifier
        frontend: String,
        /// State before the transition started
        from: LifecycleState,
        /// Target state
        to: LifecycleState,
        /// The call that failed
        operation: LifecycleOp,
        /// Cause reported by the remote client
        source: anyhow::Error,
    },

    /// No path exists from the observed state to the target state
    #[error("transition ({from} -> {to}) of frontend {frontend} is not implemented: ignoring this change")]
    UnsupportedTransition {
        /// Frontend identifier
        frontend: String,
        /// Remote state as observed
        from: String,
        /// Target state
        to: LifecycleState,
    },
}

impl SyncError {
    /// Wrap a remote client failure
    pub fn remote(
        operation: impl Into<String>,
        target: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::RemoteOperation {
            operation: operation.into(),
            target: target.into(),
            source,
        }
    }
}
