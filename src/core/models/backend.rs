//! Backend APIs
//!
//! A backend is an API definition imported into an organization. The
//! definition and the owning organization cannot change in place.

use serde::{Deserialize, Serialize};

use super::record::{ManagedRecord, changed};

/// Declared configuration of a backend API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSpec {
    /// Remote identifier, once the backend exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning organization
    #[serde(default)]
    pub org_id: String,
    /// Display name
    pub name: String,
    /// The Swagger document the backend is imported from
    #[serde(default)]
    pub swagger: String,
    /// Base path of the backend service
    #[serde(default)]
    pub base_path: String,
    /// Short summary
    #[serde(default)]
    pub summary: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Path prefix of the backend resources
    #[serde(default)]
    pub resource_path: String,
}

impl BackendSpec {
    /// A backend with a name and nothing else
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            org_id: String::new(),
            name: name.into(),
            swagger: String::new(),
            base_path: String::new(),
            summary: String::new(),
            description: String::new(),
            resource_path: String::new(),
        }
    }
}

impl ManagedRecord for BackendSpec {
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
            ("org_id", self.org_id != desired.org_id),
            ("name", self.name != desired.name),
            ("swagger", self.swagger != desired.swagger),
            ("base_path", self.base_path != desired.base_path),
            ("summary", self.summary != desired.summary),
            ("description", self.description != desired.description),
            ("resource_path", self.resource_path != desired.resource_path),
        ])
    }

    fn forces_replacement(field: &str) -> bool {
        matches!(field, "org_id" | "swagger")
    }
}
