//! Applications and their associated children

use serde::{Deserialize, Serialize};

use super::quota::QuotaSpec;
use super::record::{ManagedRecord, changed};

/// A child resource that can be associated with a parent by identifier
pub trait Identified {
    /// The child's identifier
    fn id(&self) -> &str;
}

impl Identified for String {
    fn id(&self) -> &str {
        self
    }
}

const fn default_true() -> bool {
    true
}

/// An API key held by an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeySpec {
    /// The key itself
    pub id: String,
    /// Secret; the gateway generates one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Whether the key is usable
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ApiKeySpec {
    /// An enabled key with no secret and no CORS origins
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: None,
            enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

impl Identified for ApiKeySpec {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Declared configuration of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSpec {
    /// Remote identifier, once the application exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// APIs this application can reach
    #[serde(default)]
    pub apis: Vec<String>,
    /// API keys this application holds
    #[serde(default, rename = "api_key")]
    pub api_keys: Vec<ApiKeySpec>,
    /// Quota overriding the gateway default, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<QuotaSpec>,
}

impl ApplicationSpec {
    /// An enabled application with a name and nothing attached
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            org_id: String::new(),
            phone: String::new(),
            email: String::new(),
            enabled: true,
            apis: Vec::new(),
            api_keys: Vec::new(),
            quota: None,
        }
    }
}

/// The application record itself; APIs, keys and the quota are synced
/// through their own stores
impl ManagedRecord for ApplicationSpec {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn changed_fields(&self, desired: &Self) -> Vec<&'static str> {
        changed([
            ("name", self.name != desired.name),
            ("description", self.description != desired.description),
            ("org_id", self.org_id != desired.org_id),
            ("phone", self.phone != desired.phone),
            ("email", self.email != desired.email),
            ("enabled", self.enabled != desired.enabled),
        ])
    }

    fn forces_replacement(field: &str) -> bool {
        field == "org_id"
    }
}
