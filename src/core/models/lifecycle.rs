//! Frontend lifecycle states
//!
//! The remote gateway tracks a frontend with a state string and a separate
//! `deprecated` flag. The declarative layer folds both into a single
//! [`LifecycleState`].

use serde::{Deserialize, Serialize};

/// Declared lifecycle state of a frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Not reachable by consumers
    #[default]
    Unpublished,
    /// Reachable by consumers
    Published,
    /// Published, but flagged for retirement
    Deprecated,
}

impl LifecycleState {
    /// Fold the remote `(state, deprecated)` pair into a lifecycle state
    ///
    /// Returns `None` for remote states outside the lifecycle (e.g. `pending`).
    /// A deprecation flag on an unpublished frontend is ignored: deprecation
    /// only exists on top of a publication. This applies to reads as well as
    /// transitions, so such a frontend reads back as unpublished rather than
    /// deprecated.
    #[must_use]
    pub const fn from_remote(state: &RemoteState, deprecated: bool) -> Option<Self> {
        match state {
            RemoteState::Published if deprecated => Some(Self::Deprecated),
            RemoteState::Published => Some(Self::Published),
            RemoteState::Unpublished => Some(Self::Unpublished),
            RemoteState::Other(_) => None,
        }
    }

    /// The remote `(state, deprecated)` pair representing this state
    #[must_use]
    pub const fn to_remote(self) -> (RemoteState, bool) {
        match self {
            Self::Unpublished => (RemoteState::Unpublished, false),
            Self::Published => (RemoteState::Published, false),
            Self::Deprecated => (RemoteState::Published, true),
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpublished => write!(f, "unpublished"),
            Self::Published => write!(f, "published"),
            Self::Deprecated => write!(f, "deprecated"),
        }
    }
}

impl std::str::FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpublished" => Ok(Self::Unpublished),
            "published" => Ok(Self::Published),
            "deprecated" => Ok(Self::Deprecated),
            _ => Err(format!(
                "Invalid state: {s}. Use: unpublished, published, deprecated"
            )),
        }
    }
}

/// State string as reported by the remote gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteState {
    /// `published`
    Published,
    /// `unpublished`
    Unpublished,
    /// Any transient or unknown state, such as `pending`
    Other(String),
}

impl From<String> for RemoteState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "published" => Self::Published,
            "unpublished" => Self::Unpublished,
            _ => Self::Other(value),
        }
    }
}

impl From<RemoteState> for String {
    fn from(state: RemoteState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for RemoteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Unpublished => write!(f, "unpublished"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A single remote lifecycle call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleOp {
    /// Make the frontend reachable
    Publish,
    /// Withdraw the frontend
    Unpublish,
    /// Flag a published frontend for retirement
    Deprecate,
    /// Clear the deprecation flag
    Undeprecate,
}

impl std::fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Publish => write!(f, "publish"),
            Self::Unpublish => write!(f, "unpublish"),
            Self::Deprecate => write!(f, "deprecate"),
            Self::Undeprecate => write!(f, "undeprecate"),
        }
    }
}
