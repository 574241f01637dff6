//! Centralized path definitions for gwsync
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/gwsync/
//! └── config.toml               # Provider connection settings
//! ```
//!
//! Declared-state and snapshot files are passed explicitly on the command
//! line and have no fixed location.

use std::path::PathBuf;

/// Global config directory name, under the user config directory
const GLOBAL_DIR: &str = "gwsync";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global gwsync directory.
///
/// Returns `~/.config/gwsync/` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.config/gwsync/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
