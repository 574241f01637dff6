//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `memory/` - In-memory gateway implementing every port
//! - `toml/` - Declared-state file loading
//!
//! The HTTP management client is not part of this crate; anything that
//! implements the ports in [`crate::core::ports`] can drive the services.

pub mod memory;
pub mod toml;

pub use memory::{GatewaySnapshot, MemoryGateway, Operation};
pub use self::toml::{load_desired, parse_desired};
