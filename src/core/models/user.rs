//! Gateway users

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::{ManagedRecord, changed};

const fn default_true() -> bool {
    true
}

/// The organization a user belongs to, and their role in it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainRole {
    /// Home organization
    pub org_id: String,
    /// Role in the home organization, e.g. `oadmin` or `user`
    pub role: String,
}

/// Declared configuration of a user
///
/// Users are matched by `login_name`. The password is write-only: it is
/// sent when the user is created and never compared afterwards, since the
/// gateway does not report it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    /// Remote identifier, once the user exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Login
    pub login_name: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Whether the user may log in
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Home organization and role
    #[serde(default)]
    pub main_role: MainRole,
    /// Initial password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Contact phone
    #[serde(default)]
    pub phone: String,
    /// Mobile phone
    #[serde(default)]
    pub mobile: String,
    /// Avatar, base64-encoded JPEG
    #[serde(default)]
    pub image_jpg: String,
    /// Roles in other organizations, by organization id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_roles: BTreeMap<String, String>,
}

impl UserSpec {
    /// An enabled user with a login and nothing else
    #[must_use]
    pub fn with_login(login_name: impl Into<String>) -> Self {
        Self {
            id: None,
            login_name: login_name.into(),
            name: String::new(),
            email: String::new(),
            enabled: true,
            main_role: MainRole::default(),
            password: None,
            description: String::new(),
            phone: String::new(),
            mobile: String::new(),
            image_jpg: String::new(),
            additional_roles: BTreeMap::new(),
        }
    }
}

impl ManagedRecord for UserSpec {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.login_name
    }

    fn changed_fields(&self, desired: &Self) -> Vec<&'static str> {
        changed([
            ("login_name", self.login_name != desired.login_name),
            ("name", self.name != desired.name),
            ("email", self.email != desired.email),
            ("enabled", self.enabled != desired.enabled),
            ("main_role", self.main_role != desired.main_role),
            ("description", self.description != desired.description),
            ("phone", self.phone != desired.phone),
            ("mobile", self.mobile != desired.mobile),
            ("image_jpg", self.image_jpg != desired.image_jpg),
            ("additional_roles", self.additional_roles != desired.additional_roles),
        ])
    }

    fn without_secrets(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}
