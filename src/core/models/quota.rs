//! Quotas and their remote exchange format
//!
//! A declared [`Restriction`] carries its limit as a [`RateLimit`]; the
//! remote gateway exchanges flat [`ConstraintRecord`]s instead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rate_limit::{LimitKind, ParseError, RateLimit, UnknownUnitError, canon_unit};

/// Method wildcard: the restriction applies to every method of the API
pub const ALL_METHODS: &str = "*";

/// Quota type for application-level quotas
pub const APPLICATION_QUOTA: &str = "APPLICATION";

const THROTTLE: &str = "throttle";
const THROTTLE_MB: &str = "throttlemb";

/// Errors converting a remote constraint into a declared restriction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// The remote limit kind is neither `throttle` nor `throttlemb`
    #[error("cannot understand constraint on api '{api_id}': unknown limit kind '{kind}'")]
    UnknownKind {
        /// API the constraint applies to
        api_id: String,
        /// Limit kind as received
        kind: String,
    },

    /// The remote period unit does not resolve
    #[error("cannot understand constraint on api '{api_id}': {source}")]
    UnknownUnit {
        /// API the constraint applies to
        api_id: String,
        /// Unit resolution failure
        #[source]
        source: UnknownUnitError,
    },

    /// The remote amounts do not form a valid limit
    #[error("invalid constraint on api '{api_id}': {source}")]
    InvalidLimit {
        /// API the constraint applies to
        api_id: String,
        /// Limit validation failure
        #[source]
        source: ParseError,
    },
}

fn default_method() -> String {
    ALL_METHODS.to_string()
}

/// A declared limit on one API (or one method of it)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Restriction {
    /// API being limited
    pub api_id: String,
    /// Method name, or `*` for all methods
    #[serde(default = "default_method")]
    pub method: String,
    /// The limit, written loosely (e.g. `20 MB per minute`)
    pub limit: RateLimit,
}

impl Restriction {
    /// Create a restriction covering every method of an API
    #[must_use]
    pub fn all_methods(api_id: impl Into<String>, limit: RateLimit) -> Self {
        Self {
            api_id: api_id.into(),
            method: default_method(),
            limit,
        }
    }
}

/// Declared quota of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSpec {
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Restrictions, at least one in practice
    #[serde(default, rename = "restriction")]
    pub restrictions: Vec<Restriction>,
}

/// A constraint as exchanged with the remote gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    /// API being limited
    pub api_id: String,
    /// Method name, or `*`
    pub method: String,
    /// `throttle` (messages) or `throttlemb` (megabytes)
    pub limit_kind: String,
    /// Messages or megabytes per period
    pub limit_amount: u32,
    /// Number of time units per period
    pub period_amount: u32,
    /// Time unit of the period
    pub period_unit: String,
}

impl ConstraintRecord {
    /// Build the remote record for a declared restriction
    #[must_use]
    pub fn from_restriction(restriction: &Restriction) -> Self {
        let limit = &restriction.limit;
        let limit_kind = match limit.kind() {
            LimitKind::Messages => THROTTLE,
            LimitKind::Megabytes => THROTTLE_MB,
        };
        Self {
            api_id: restriction.api_id.clone(),
            method: restriction.method.clone(),
            limit_kind: limit_kind.to_string(),
            limit_amount: limit.amount(),
            period_amount: limit.period_amount(),
            period_unit: limit.period_unit().to_string(),
        }
    }

    /// Convert back into a declared restriction
    pub fn to_restriction(&self) -> Result<Restriction, ConstraintError> {
        let kind = match self.limit_kind.as_str() {
            THROTTLE => LimitKind::Messages,
            THROTTLE_MB => LimitKind::Megabytes,
            other => {
                return Err(ConstraintError::UnknownKind {
                    api_id: self.api_id.clone(),
                    kind: other.to_string(),
                });
            },
        };
        let unit = canon_unit(&self.period_unit).map_err(|source| ConstraintError::UnknownUnit {
            api_id: self.api_id.clone(),
            source,
        })?;
        let limit = RateLimit::new(kind, self.limit_amount, self.period_amount, unit).map_err(
            |source| ConstraintError::InvalidLimit {
                api_id: self.api_id.clone(),
                source,
            },
        )?;
        Ok(Restriction {
            api_id: self.api_id.clone(),
            method: self.method.clone(),
            limit,
        })
    }
}

/// Convert declared restrictions into remote records
///
/// Restrictions with an empty `api_id` are phantom entries left behind by
/// set-valued configuration and are skipped.
#[must_use]
pub fn expand_restrictions(restrictions: &[Restriction]) -> Vec<ConstraintRecord> {
    restrictions
        .iter()
        .filter(|r| !r.api_id.is_empty())
        .map(ConstraintRecord::from_restriction)
        .collect()
}

/// Convert remote records into declared restrictions
pub fn flatten_constraints(
    records: &[ConstraintRecord],
) -> Result<Vec<Restriction>, ConstraintError> {
    records.iter().map(ConstraintRecord::to_restriction).collect()
}

/// A quota as stored by the remote gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Remote identifier (empty until created)
    #[serde(default)]
    pub id: String,
    /// Quota name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Quota type, e.g. `APPLICATION`
    #[serde(rename = "type", default = "default_quota_type")]
    pub quota_type: String,
    /// System quotas are defaults managed by the gateway itself
    #[serde(default)]
    pub system: bool,
    /// Constraints
    #[serde(default, rename = "restriction")]
    pub restrictions: Vec<ConstraintRecord>,
}

fn default_quota_type() -> String {
    APPLICATION_QUOTA.to_string()
}

impl Quota {
    /// Build the application quota for a declared quota spec
    #[must_use]
    pub fn for_application(application_name: &str, spec: &QuotaSpec) -> Self {
        Self {
            id: String::new(),
            name: format!("quota for {application_name}"),
            description: spec.description.clone(),
            quota_type: APPLICATION_QUOTA.to_string(),
            system: false,
            restrictions: expand_restrictions(&spec.restrictions),
        }
    }

    /// Whether this quota was set up for the application (rather than
    /// being the gateway's system default)
    #[must_use]
    pub fn is_custom(&self) -> bool {
        !self.id.is_empty() && !self.system
    }

    /// Whether this remote quota already enforces `desired`
    ///
    /// Restrictions are compared through their canonical form, ignoring
    /// order, duplicates and phantom entries, so a limit written
    /// `"10MB/s"` matches one stored as 10 MB per 1 second. A remote
    /// constraint that cannot be read back never matches.
    #[must_use]
    pub fn matches(&self, desired: &Self) -> bool {
        if self.name != desired.name || self.description != desired.description {
            return false;
        }
        match (restriction_keys(&self.restrictions), restriction_keys(&desired.restrictions)) {
            (Ok(remote), Ok(wanted)) => remote == wanted,
            _ => false,
        }
    }
}

fn restriction_keys(
    records: &[ConstraintRecord],
) -> Result<BTreeSet<(String, String, String)>, ConstraintError> {
    Ok(flatten_constraints(records)?
        .into_iter()
        .filter(|r| !r.api_id.is_empty())
        .map(|r| (r.api_id, r.method, r.limit.canonicalize()))
        .collect())
}
