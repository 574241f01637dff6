//! Domain models for gwsync
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`RateLimit`] - "100 msg per 2 minutes", parsed and canonicalized
//! - [`LifecycleState`] - Unpublished, published or deprecated frontend
//! - [`FrontendSpec`] / [`ApplicationSpec`] - Declared resource configuration
//! - [`ManagedRecord`] - Organizations, users, backends and applications,
//!   synced as whole records
//! - [`Quota`] / [`ConstraintRecord`] - Remote quota exchange format
//! - [`Diagnostics`] - Warnings and errors collected while converging

mod application;
mod backend;
mod desired;
mod diagnostic;
mod frontend;
mod lifecycle;
mod organization;
mod quota;
mod rate_limit;
mod record;
mod user;

pub use application::{ApiKeySpec, ApplicationSpec, Identified};
pub use backend::BackendSpec;
pub use desired::DesiredState;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use frontend::{FrontendField, FrontendSpec, FrontendStatus};
pub use lifecycle::{LifecycleOp, LifecycleState, RemoteState};
pub use organization::OrganizationSpec;
pub use quota::{
    ALL_METHODS, APPLICATION_QUOTA, ConstraintError, ConstraintRecord, Quota, QuotaSpec,
    Restriction, expand_restrictions, flatten_constraints,
};
pub use rate_limit::{
    LIMIT_GRAMMAR, LimitKind, ParseError, RateLimit, TimeUnit, UnknownUnitError, canon_unit,
};
pub use record::ManagedRecord;
pub use user::{MainRole, UserSpec};
