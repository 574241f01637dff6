//! Core domain logic for gwsync
//!
//! This module contains the reconciliation logic with no I/O dependencies.
//! All remote interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (RateLimit, LifecycleState, specs, Diagnostics)
//! - `services/` - Reconciliation and lifecycle orchestration
//! - `ports/` - Trait definitions for the remote gateway
//! - `error` - Failures raised while syncing

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::SyncError;
