//! Diagnostics collected while converging state
//!
//! Multi-step operations keep going after a failure where they can, so
//! they report everything that happened rather than stopping at the first
//! error.

use serde::{Deserialize, Serialize};

use crate::core::error::SyncError;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Shown, but the operation is considered successful
    Warning,
    /// The operation did not fully converge
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single reported problem or notice
#[derive(Debug)]
pub struct Diagnostic {
    /// How serious it is
    pub severity: Severity,
    /// Human-readable summary
    pub summary: String,
    /// Underlying error, if any
    pub source: Option<SyncError>,
}

impl Diagnostic {
    /// An error diagnostic for a failure
    #[must_use]
    pub fn error(err: SyncError) -> Self {
        Self {
            severity: Severity::Error,
            summary: err.to_string(),
            source: Some(err),
        }
    }

    /// A warning diagnostic for a failure that does not block the operation
    #[must_use]
    pub fn warning_from(err: SyncError) -> Self {
        Self {
            severity: Severity::Warning,
            summary: err.to_string(),
            source: Some(err),
        }
    }

    /// A plain warning notice
    #[must_use]
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            source: None,
        }
    }

    /// Check if this is an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)
    }
}

/// An ordered collection of diagnostics
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// An empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Record an error
    pub fn error(&mut self, err: SyncError) {
        self.push(Diagnostic::error(err));
    }

    /// Record a warning notice
    pub fn warn(&mut self, summary: impl Into<String>) {
        self.push(Diagnostic::warning(summary));
    }

    /// Append all diagnostics from another collection
    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Turn every error into a warning
    #[must_use]
    pub fn downgrade_errors(self) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|mut d| {
                d.severity = Severity::Warning;
                d
            })
            .collect();
        Self { items }
    }

    /// Check if any diagnostic is an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Iterate over all diagnostics
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Iterate over the errors only
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    /// Iterate over the warnings only
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| !d.is_error())
    }

    /// Number of diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no diagnostics
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            items: vec![diagnostic],
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
