//! Non-fatal parse diagnostics.
//!
//! Every diagnostic is tagged with the source line and the section that was
//! active, kept in a [`Diagnostics`] collector and logged through `tracing`
//! as it is recorded.

use std::fmt;

use serde::Serialize;
use tracing::{error, warn};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What went wrong, independent of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Misplaced keyword, module switching mistakes. The line is ignored.
    Structural,
    /// Fewer tokens than the section needs. The line is skipped.
    ArgumentCount,
    /// Bad number, enum letter or option char. A fallback value is used.
    ValueDecode,
    /// A required key of a compound attribute list is absent.
    MissingSubKey,
    /// The line is well formed but cannot be applied (missing texture, no forward gear, ...).
    Semantic,
}

impl DiagnosticKind {
    /// Machine-readable code, e.g. `rigdef::argument-count`.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::Structural => "rigdef::structural",
            DiagnosticKind::ArgumentCount => "rigdef::argument-count",
            DiagnosticKind::ValueDecode => "rigdef::value-decode",
            DiagnosticKind::MissingSubKey => "rigdef::missing-sub-key",
            DiagnosticKind::Semantic => "rigdef::semantic",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single parse diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Source line, 1-indexed.
    pub line: usize,
    /// Keyword of the section or directive being processed.
    pub section: Option<&'static str>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            line: 0,
            section: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            line: 0,
            section: None,
            message: message.into(),
        }
    }

    /// Attach the source position.
    pub fn at(mut self, line: usize, section: Option<&'static str>) -> Self {
        self.line = line;
        self.section = section;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.line,
            self.section.unwrap_or("-"),
            self.message
        )
    }
}

/// Collects diagnostics in the order they were raised.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        let section = diagnostic.section.unwrap_or("-");
        match diagnostic.severity {
            Severity::Warning => warn!(
                line = diagnostic.line,
                section,
                code = diagnostic.kind.code(),
                "{}",
                diagnostic.message
            ),
            Severity::Error => error!(
                line = diagnostic.line,
                section,
                code = diagnostic.kind.code(),
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());
        assert!(!diags.has_warnings());
        assert_eq!(diags.error_count(), 0);
    }

    #[test]
    fn test_counts_by_severity() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning(DiagnosticKind::ValueDecode, "bad flag").at(3, Some("beams")));
        diags.push(Diagnostic::error(DiagnosticKind::Structural, "misplaced").at(7, None));

        assert_eq!(diags.len(), 2);
        assert_eq!(diags.warning_count(), 1);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.of_kind(DiagnosticKind::Structural).count(), 1);
    }

    #[test]
    fn test_display_includes_position() {
        let d = Diagnostic::warning(DiagnosticKind::ArgumentCount, "Not enough arguments")
            .at(12, Some("nodes"));
        insta::assert_snapshot!(d.to_string(), @"12 (nodes): Not enough arguments");
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(DiagnosticKind::MissingSubKey.code(), "rigdef::missing-sub-key");
        assert_eq!(DiagnosticKind::Semantic.to_string(), "rigdef::semantic");
    }
}
