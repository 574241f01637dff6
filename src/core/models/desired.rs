//! The declared state document

use serde::{Deserialize, Serialize};

use super::application::ApplicationSpec;
use super::backend::BackendSpec;
use super::frontend::FrontendSpec;
use super::organization::OrganizationSpec;
use super::user::UserSpec;

/// Everything a user declared should exist on the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Declared organizations
    #[serde(default, rename = "organization")]
    pub organizations: Vec<OrganizationSpec>,
    /// Declared users
    #[serde(default, rename = "user")]
    pub users: Vec<UserSpec>,
    /// Declared backend APIs
    #[serde(default, rename = "backend")]
    pub backends: Vec<BackendSpec>,
    /// Declared applications
    #[serde(default, rename = "application")]
    pub applications: Vec<ApplicationSpec>,
    /// Declared frontends
    #[serde(default, rename = "frontend")]
    pub frontends: Vec<FrontendSpec>,
}

impl DesiredState {
    /// Check if nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
            && self.users.is_empty()
            && self.backends.is_empty()
            && self.applications.is_empty()
            && self.frontends.is_empty()
    }
}
