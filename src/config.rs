//! Provider configuration
//!
//! Connection settings for the remote management API. Config is stored at
//! `~/.config/gwsync/config.toml` (XDG standard) and every field can be
//! overridden from the environment:
//!
//! | variable                    | field                 |
//! |-----------------------------|-----------------------|
//! | `GWSYNC_HOST`               | `host`                |
//! | `GWSYNC_USERNAME`           | `username`            |
//! | `GWSYNC_PASSWORD`           | `password`            |
//! | `GWSYNC_PROXY`              | `proxy`               |
//! | `GWSYNC_SKIP_TLS_CERT_VERIF`| `skip_tls_cert_verif` |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GWSYNC_";

/// Shown in place of secrets
const REDACTED: &str = "********";

/// A provider configuration that cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Credentials are required to reach the management API
    #[error("missing username and/or password configuration")]
    MissingCredentials,

    /// The proxy setting is not a URL
    #[error("when a proxy is given, it should be a valid URL: {proxy}: {source}")]
    InvalidProxy {
        /// The rejected value
        proxy: String,
        /// Why it was rejected
        #[source]
        source: url::ParseError,
    },

    /// A boolean environment override could not be read
    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag {
        /// Variable name
        var: String,
        /// The rejected value
        value: String,
    },
}

/// Connection settings for the remote management API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Management API host, e.g. `apimgr.example.com:8075`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Login password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Proxy URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Accept self-signed certificates
    #[serde(default)]
    pub skip_tls_cert_verif: bool,
    /// How long to wait for the gateway to report ready
    #[serde(default = "default_readiness_timeout")]
    pub readiness_timeout_secs: u64,
}

const fn default_readiness_timeout() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            proxy: None,
            skip_tls_cert_verif: false,
            readiness_timeout_secs: default_readiness_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load the config file and apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load a config file, or the defaults if it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
    }

    /// Save config to disk
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Override fields from variables found by `lookup`
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |field: &str| {
            lookup(&format!("{ENV_PREFIX}{field}")).filter(|value| !value.is_empty())
        };

        if let Some(host) = var("HOST") {
            self.host = Some(host);
        }
        if let Some(username) = var("USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = var("PASSWORD") {
            self.password = Some(password);
        }
        if let Some(proxy) = var("PROXY") {
            self.proxy = Some(proxy);
        }
        if let Some(flag) = var("SKIP_TLS_CERT_VERIF") {
            self.skip_tls_cert_verif = match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        var: format!("{ENV_PREFIX}SKIP_TLS_CERT_VERIF"),
                        value: flag,
                    });
                },
            };
        }
        Ok(())
    }

    /// Check that the config can be used to connect
    pub fn validate(&self) -> Result<(), ConfigError> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        if !present(&self.username) || !present(&self.password) {
            return Err(ConfigError::MissingCredentials);
        }
        if let Some(proxy) = &self.proxy {
            url::Url::parse(proxy).map_err(|source| ConfigError::InvalidProxy {
                proxy: proxy.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// A copy safe to display, with secrets masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| REDACTED.to_string());
        Self {
            password: mask(&self.password),
            proxy: mask(&self.proxy),
            ..self.clone()
        }
    }
}
