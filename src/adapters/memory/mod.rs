//! In-memory gateway
//!
//! Implements every port trait without a network. The CLI replays declared
//! state against it to show what a sync would do, and tests use it as a
//! fake remote.
//!
//! - [`snapshot`] - Serializable initial contents
//! - [`gateway`] - The port implementations and the call journal

pub mod gateway;
pub mod snapshot;

pub use gateway::{
    MemoryApiKeys, MemoryApis, MemoryApplications, MemoryGateway, MemoryRecords, Operation,
};
pub use snapshot::{ApplicationRecord, FrontendRecord, GatewaySnapshot};
