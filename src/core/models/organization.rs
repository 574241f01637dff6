//! Organizations

use serde::{Deserialize, Serialize};

use super::record::{ManagedRecord, changed};

const fn default_true() -> bool {
    true
}

/// Declared configuration of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSpec {
    /// Remote identifier, once the organization exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: String,
    /// Virtual host the organization's APIs are exposed on
    #[serde(default)]
    pub virtual_host: String,
    /// Whether the organization is active
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Development organizations may register APIs
    #[serde(default)]
    pub development: bool,
    /// Logo, base64-encoded JPEG
    #[serde(default)]
    pub image_jpg: String,
}

impl OrganizationSpec {
    /// An enabled organization with a name and nothing else
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            virtual_host: String::new(),
            enabled: true,
            development: false,
            image_jpg: String::new(),
        }
    }
}

impl ManagedRecord for OrganizationSpec {
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
            ("email", self.email != desired.email),
            ("phone", self.phone != desired.phone),
            ("virtual_host", self.virtual_host != desired.virtual_host),
            ("enabled", self.enabled != desired.enabled),
            ("development", self.development != desired.development),
            ("image_jpg", self.image_jpg != desired.image_jpg),
        ])
    }
}
