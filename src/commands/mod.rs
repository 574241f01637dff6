//! Command implementations

mod config_cmd;
mod diff;
mod limit;
mod plan;
mod transition;

pub use config_cmd::config;
pub use diff::diff;
pub use limit::limit;
pub use plan::plan;
pub use transition::transition;
