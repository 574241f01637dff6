//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::adapters::memory::Operation;
use crate::config::ProviderConfig;
use crate::core::models::{Diagnostic, Diagnostics, Severity};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of parsing limit expressions
#[derive(Debug, Serialize)]
pub struct LimitResult {
    /// One entry per expression, in input order
    pub limits: Vec<LimitInfo>,
}

/// A single parsed (or rejected) limit expression
#[derive(Debug, Serialize)]
pub struct LimitInfo {
    /// The expression as given
    pub input: String,
    /// Canonical form, when it parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Why it was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LimitResult {
    /// Whether every expression parsed
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.limits.iter().all(|l| l.error.is_none())
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        for limit in &self.limits {
            match (&limit.canonical, &limit.error) {
                (Some(canonical), _) => println!("{}  {canonical}", limit.input),
                (None, Some(error)) => {
                    println!("{}  {} {error}", limit.input, "invalid:".red());
                },
                (None, None) => println!("{}", limit.input),
            }
        }
    }
}

/// Result of reconciling two identifier sets
#[derive(Debug, Serialize)]
pub struct DiffResult {
    /// Identifiers to add
    pub to_add: Vec<String>,
    /// Identifiers to remove
    pub to_remove: Vec<String>,
    /// Identifiers left untouched
    pub unchanged: Vec<String>,
}

impl DiffResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.to_add.is_empty() && self.to_remove.is_empty() {
            println!("Already converged.");
            return;
        }
        for id in &self.to_add {
            println!("{} {id}", "+".green());
        }
        for id in &self.to_remove {
            println!("{} {id}", "-".red());
        }
    }
}

/// Planned lifecycle calls between two states
#[derive(Debug, Serialize)]
pub struct TransitionResult {
    /// Starting state
    pub from: String,
    /// Target state
    pub to: String,
    /// Calls, in order
    pub operations: Vec<String>,
}

impl TransitionResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.operations.is_empty() {
            println!("{} -> {}: nothing to do", self.from, self.to);
        } else {
            println!("{} -> {}: {}", self.from, self.to, self.operations.join(", "));
        }
    }
}

/// A diagnostic as shown to the user
#[derive(Debug, Serialize)]
pub struct DiagnosticInfo {
    /// `warning` or `error`
    pub severity: String,
    /// What happened
    pub summary: String,
}

impl From<&Diagnostic> for DiagnosticInfo {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity.to_string(),
            summary: diagnostic.summary.clone(),
        }
    }
}

/// Result of replaying declared state against a snapshot
#[derive(Debug, Serialize)]
pub struct PlanResult {
    /// When the plan was computed (RFC3339)
    pub generated_at: String,
    /// Calls the gateway received, in order
    pub operations: Vec<Operation>,
    /// Everything reported along the way
    pub diagnostics: Vec<DiagnosticInfo>,
    /// Number of error diagnostics
    pub errors: usize,
}

impl PlanResult {
    /// Build a plan result from the gateway journal and the diagnostics
    #[must_use]
    pub fn new(operations: Vec<Operation>, diagnostics: &Diagnostics) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            operations,
            diagnostics: diagnostics.iter().map(DiagnosticInfo::from).collect(),
            errors: diagnostics.errors().count(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.operations.is_empty() {
            println!("No changes.");
        } else {
            println!("Operations:");
            for op in &self.operations {
                if op.succeeded {
                    println!("  {op}");
                } else {
                    println!("  {}", op.to_string().as_str().red());
                }
            }
        }

        if !self.diagnostics.is_empty() {
            println!();
            for d in &self.diagnostics {
                let label = if d.severity == Severity::Error.to_string() {
                    d.severity.as_str().red().bold()
                } else {
                    d.severity.as_str().yellow()
                };
                println!("{label}: {}", d.summary);
            }
        }

        if self.errors > 0 {
            println!("\nFAILED: {} error(s)", self.errors);
        }
    }
}

/// Resolved provider configuration
#[derive(Debug, Serialize)]
pub struct ConfigResult {
    /// Config file location
    pub path: String,
    /// Settings, secrets masked
    pub config: ProviderConfig,
    /// Validation outcome, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    /// Why validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl ConfigResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let unset = || "(unset)".to_string();
        println!("Config: {}", self.path);
        println!("  host:                {}", self.config.host.clone().unwrap_or_else(unset));
        println!("  username:            {}", self.config.username.clone().unwrap_or_else(unset));
        println!("  password:            {}", self.config.password.clone().unwrap_or_else(unset));
        println!("  proxy:               {}", self.config.proxy.clone().unwrap_or_else(unset));
        println!("  skip_tls_cert_verif: {}", self.config.skip_tls_cert_verif);
        println!("  readiness_timeout:   {}s", self.config.readiness_timeout_secs);

        match (self.valid, &self.problem) {
            (Some(true), _) => println!("\n{}", "Config is valid.".green()),
            (Some(false), Some(problem)) => println!("\n{} {problem}", "invalid:".red()),
            _ => {},
        }
    }
}
