//! Host-facing diagnostics.
//!
//! The generator reports exactly two named conditions to its host: a
//! missing output directory (error) and an empty asset set (warning).
//! Everything else is either logged or carried in the run report.
//!
//! # Examples
//!
//! ```
//! use icongen_core::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
//!
//! let mut sink = CollectingSink::default();
//! sink.report(Diagnostic::no_assets_found());
//!
//! assert_eq!(sink.diagnostics()[0].id, "ICONGEN002");
//! assert_eq!(sink.diagnostics()[0].severity, Severity::Warning);
//! ```

use serde::Serialize;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal; the run ends without touching prior output.
    Warning,
    /// Fatal; the run aborts before any filesystem mutation.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A diagnostic reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable identifier
    pub id: &'static str,
    /// Short title
    pub title: &'static str,
    /// Human-readable message
    pub message: String,
    /// Severity
    pub severity: Severity,
}

impl Diagnostic {
    /// The output directory was not configured.
    #[must_use]
    pub fn missing_output_dir() -> Self {
        Self {
            id: "ICONGEN001",
            title: "Missing Output Directory",
            message: "The output directory should be specified (config `output_dir`, \
                      `--output`, or ICONGEN_OUTPUT_DIR)"
                .to_string(),
            severity: Severity::Error,
        }
    }

    /// The asset source produced nothing.
    #[must_use]
    pub fn no_assets_found() -> Self {
        Self {
            id: "ICONGEN002",
            title: "No Icon Assets Found",
            message: "No icon assets were found; existing output was left untouched".to_string(),
            severity: Severity::Warning,
        }
    }

    /// Returns `true` for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.id, self.message)
    }
}

/// Receives diagnostics on behalf of the host.
pub trait DiagnosticSink {
    /// Reports a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(id = diagnostic.id, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(id = diagnostic.id, "{}", diagnostic.message),
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// Returns the collected diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the sink and returns the collected diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!("Collected diagnostic {}", diagnostic.id);
        self.diagnostics.push(diagnostic);
    }
}
