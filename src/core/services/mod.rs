//! Business logic services
//!
//! Orchestration logic that drives the port traits. Services never raise:
//! every multi-step flow returns the [`Diagnostics`](crate::core::models::Diagnostics)
//! it collected so partial failures surface together.
//!
//! - [`reconciler`] - Minimal add/remove plans and association sync
//! - [`lifecycle`] - Frontend publish/deprecate transition table
//! - [`frontend`] - Create, update and delete flows for frontends
//! - [`record`] - Organization, user, backend and application records
//! - [`quota`] - Application quota sync
//! - [`application`] - Application sync
//! - [`converge`] - Whole declared-state documents, and their teardown

pub mod application;
pub mod converge;
pub mod frontend;
pub mod lifecycle;
pub mod quota;
pub mod reconciler;
pub mod record;

pub use application::{ApplicationOutcome, ApplicationStores, sync_application};
pub use converge::{Gateway, converge, converge_frontend, destroy};
pub use frontend::{
    FrontendOutcome, create_frontend, delete_frontend, must_unpublish, update_frontend,
};
pub use lifecycle::{apply_transition, current_state, plan_transition};
pub use quota::sync_quota;
pub use reconciler::{Reconciliation, reconcile, sync_associations};
pub use record::{RecordOutcome, delete_record, locate_record, push_record, sync_record};
