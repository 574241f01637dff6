//! TOML declared-state files
//!
//! - [`parser`] - Read and validate `desired.toml` documents

pub mod parser;

pub use parser::{load_desired, parse_desired};
