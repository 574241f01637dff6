//! Serializable gateway contents
//!
//! A snapshot describes what an in-memory gateway holds before any call
//! is made. It is usually loaded from a TOML file:
//!
//! ```toml
//! fail = ["publish fe-2"]
//!
//! [[organization]]
//! id = "org-1"
//! name = "acme"
//!
//! [[application]]
//! id = "app-1"
//! name = "billing"
//! apis = ["api-a", "api-b"]
//!
//! [[frontend]]
//! id = "fe-1"
//! name = "petstore"
//! state = "published"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::{
    ApiKeySpec, BackendSpec, FrontendSpec, FrontendStatus, OrganizationSpec, Quota, RemoteState,
    UserSpec,
};

/// Initial contents of an in-memory gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySnapshot {
    /// Existing organizations; `id` is required
    #[serde(default, rename = "organization")]
    pub organizations: Vec<OrganizationSpec>,
    /// Existing users; `id` is required
    #[serde(default, rename = "user")]
    pub users: Vec<UserSpec>,
    /// Existing backend APIs; `id` is required
    #[serde(default, rename = "backend")]
    pub backends: Vec<BackendSpec>,
    /// Existing applications
    #[serde(default, rename = "application")]
    pub applications: Vec<ApplicationRecord>,
    /// Existing frontends
    #[serde(default, rename = "frontend")]
    pub frontends: Vec<FrontendRecord>,
    /// Calls that should fail, as `"<action>"` or `"<action> <target>"`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fail: Vec<String>,
}

impl GatewaySnapshot {
    /// Parse a snapshot from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }
}

/// An application as the gateway stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Remote identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Owning organization
    #[serde(default)]
    pub org_id: String,
    /// Contact phone
    #[serde(default)]
    pub phone: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Whether the application may call APIs
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Associated API identifiers
    #[serde(default)]
    pub apis: Vec<String>,
    /// Keys held by the application
    #[serde(default, rename = "api_key")]
    pub api_keys: Vec<ApiKeySpec>,
    /// Quota currently applying, custom or system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<Quota>,
}

const fn default_enabled() -> bool {
    true
}

/// A frontend as the gateway stores it
///
/// The remote state defaults to the one the spec's lifecycle state maps
/// to. `remote_state` and `deprecated` override it, which is how transient
/// states such as `pending` are seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendRecord {
    /// Persisted configuration; `id` is required
    #[serde(flatten)]
    pub spec: FrontendSpec,
    /// Raw remote state string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_state: Option<RemoteState>,
    /// Raw deprecation flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

impl FrontendRecord {
    /// The status the gateway reports for this record
    pub fn status(&self) -> anyhow::Result<FrontendStatus> {
        let Some(id) = self.spec.id.clone() else {
            anyhow::bail!("frontend {} has no id", self.spec.name);
        };
        let (state, deprecated) = self.spec.state.to_remote();
        Ok(FrontendStatus {
            id,
            name: self.spec.name.clone(),
            state: self.remote_state.clone().unwrap_or(state),
            deprecated: self.deprecated.unwrap_or(deprecated),
        })
    }
}
