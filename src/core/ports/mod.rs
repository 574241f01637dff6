//! Port traits (interfaces) for the remote gateway
//!
//! These traits define the boundary between the reconciliation logic
//! and the remote API-gateway management client.
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core services depend only on these traits, never on a concrete
//! client. Remote failures are opaque `anyhow` errors; the services decide
//! how they are reported.

mod associations;
mod frontend;
mod quota_store;
mod records;

pub use associations::AssociationStore;
pub use frontend::FrontendClient;
pub use quota_store::QuotaStore;
pub use records::RecordStore;
