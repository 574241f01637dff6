//! Frontend (published API proxy) records
//!
//! [`FrontendSpec`] is the declared configuration of a frontend,
//! [`FrontendStatus`] the view the remote gateway reports back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lifecycle::{LifecycleState, RemoteState};

/// Declared configuration of a frontend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSpec {
    /// Remote identifier, once the frontend exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Owning organization
    #[serde(default)]
    pub org_id: String,
    /// Backend API being exposed
    #[serde(default)]
    pub api_id: String,
    /// Version label
    #[serde(default)]
    pub version: String,
    /// Routing key
    #[serde(default)]
    pub api_routing_key: String,
    /// Virtual host
    #[serde(default)]
    pub vhost: String,
    /// Exposure path, e.g. `/petstore/v1`
    #[serde(default)]
    pub path: String,
    /// How the description is provided (manual, markdown, url, ...)
    #[serde(default)]
    pub description_type: String,
    /// Inline description
    #[serde(default)]
    pub description_manual: String,
    /// Markdown description
    #[serde(default)]
    pub description_markdown: String,
    /// Description URL
    #[serde(default)]
    pub description_url: String,
    /// One-line summary
    #[serde(default)]
    pub summary: String,
    /// Hash of the frontend image
    #[serde(default)]
    pub image_jpg: String,
    /// Retired flag
    #[serde(default)]
    pub retired: bool,
    /// Expired flag
    #[serde(default)]
    pub expired: bool,
    /// Retirement date (epoch millis)
    #[serde(default)]
    pub retirement_date: i64,
    /// Desired lifecycle state
    #[serde(default)]
    pub state: LifecycleState,
    /// Tags: name to values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, Vec<String>>,
    /// Free-form custom properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_properties: BTreeMap<String, String>,
}

/// A configurable field of a frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum FrontendField {
    Name,
    OrgId,
    ApiId,
    Version,
    ApiRoutingKey,
    Vhost,
    Path,
    DescriptionType,
    DescriptionManual,
    DescriptionMarkdown,
    DescriptionUrl,
    Summary,
    ImageJpg,
    Retired,
    Expired,
    RetirementDate,
    State,
    Tags,
    CustomProperties,
}

impl FrontendField {
    /// Whether the gateway accepts a change to this field while the
    /// frontend is published or deprecated
    #[must_use]
    pub const fn is_live_editable(self) -> bool {
        matches!(
            self,
            Self::State
                | Self::DescriptionType
                | Self::DescriptionManual
                | Self::DescriptionMarkdown
                | Self::DescriptionUrl
                | Self::Summary
                | Self::ImageJpg
        )
    }

    /// Whether a change requires destroying and recreating the frontend
    #[must_use]
    pub const fn forces_replacement(self) -> bool {
        matches!(self, Self::OrgId | Self::ApiId)
    }

    /// Configuration key of the field
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OrgId => "org_id",
            Self::ApiId => "api_id",
            Self::Version => "version",
            Self::ApiRoutingKey => "api_routing_key",
            Self::Vhost => "vhost",
            Self::Path => "path",
            Self::DescriptionType => "description_type",
            Self::DescriptionManual => "description_manual",
            Self::DescriptionMarkdown => "description_markdown",
            Self::DescriptionUrl => "description_url",
            Self::Summary => "summary",
            Self::ImageJpg => "image_jpg",
            Self::Retired => "retired",
            Self::Expired => "expired",
            Self::RetirementDate => "retirement_date",
            Self::State => "state",
            Self::Tags => "tags",
            Self::CustomProperties => "custom_properties",
        }
    }
}

impl std::fmt::Display for FrontendField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FrontendSpec {
    /// Create a spec with a name and everything else defaulted
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fields that differ between this (persisted) spec and `desired`
    ///
    /// The remote identifier is not a configurable field and is ignored.
    #[must_use]
    pub fn changed_fields(&self, desired: &Self) -> Vec<FrontendField> {
        let checks = [
            (FrontendField::Name, self.name != desired.name),
            (FrontendField::OrgId, self.org_id != desired.org_id),
            (FrontendField::ApiId, self.api_id != desired.api_id),
            (FrontendField::Version, self.version != desired.version),
            (FrontendField::ApiRoutingKey, self.api_routing_key != desired.api_routing_key),
            (FrontendField::Vhost, self.vhost != desired.vhost),
            (FrontendField::Path, self.path != desired.path),
            (FrontendField::DescriptionType, self.description_type != desired.description_type),
            (
                FrontendField::DescriptionManual,
                self.description_manual != desired.description_manual,
            ),
            (
                FrontendField::DescriptionMarkdown,
                self.description_markdown != desired.description_markdown,
            ),
            (FrontendField::DescriptionUrl, self.description_url != desired.description_url),
            (FrontendField::Summary, self.summary != desired.summary),
            (FrontendField::ImageJpg, self.image_jpg != desired.image_jpg),
            (FrontendField::Retired, self.retired != desired.retired),
            (FrontendField::Expired, self.expired != desired.expired),
            (FrontendField::RetirementDate, self.retirement_date != desired.retirement_date),
            (FrontendField::State, self.state != desired.state),
            (FrontendField::Tags, self.tags != desired.tags),
            (FrontendField::CustomProperties, self.custom_properties != desired.custom_properties),
        ];
        checks.into_iter().filter(|(_, changed)| *changed).map(|(field, _)| field).collect()
    }
}

/// The remote gateway's view of a frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendStatus {
    /// Remote identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Remote state string
    pub state: RemoteState,
    /// Deprecation flag
    #[serde(default)]
    pub deprecated: bool,
}

impl FrontendStatus {
    /// The folded lifecycle state, if the remote state has one
    #[must_use]
    pub const fn lifecycle(&self) -> Option<LifecycleState> {
        LifecycleState::from_remote(&self.state, self.deprecated)
    }

    /// Whether the remote pair is one the gateway should never report
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        self.deprecated && !matches!(self.state, RemoteState::Published)
    }
}
