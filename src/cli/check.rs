//! Check command implementation.
//!
//! Parses each rig file and prints its diagnostics.

use std::path::PathBuf;

use clap::Args;

use super::load_config;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_file;

/// Parse rig files and report diagnostics
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rig files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (default: rigdef.yaml next to each rig file)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Totals over all checked files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// One diagnostic as `path:line [section] message (code)`.
pub fn format_diagnostic(path: &str, diagnostic: &Diagnostic) -> String {
    format!(
        "{}:{} [{}] {} ({})",
        path,
        diagnostic.line,
        diagnostic.section.unwrap_or("-"),
        diagnostic.message,
        diagnostic.kind.code()
    )
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<CheckSummary> {
    let mut summary = CheckSummary::default();

    for file in &args.files {
        let display = display_path(file);
        let config = load_config(args.config.as_ref(), file)?;
        printer.status("Checking", &display);

        let outcome = parse_file(file, &config)?;
        for diagnostic in outcome.diagnostics.iter() {
            let line = format_diagnostic(&display, diagnostic);
            match diagnostic.severity {
                Severity::Warning => printer.warning("warning", &line),
                Severity::Error => printer.error("error", &line),
            }
        }
        if let Some(err) = &outcome.read_error {
            printer.error("Failed", &format!("{}: {}", display, err));
            summary.errors += 1;
        }

        summary.files += 1;
        summary.errors += outcome.diagnostics.error_count();
        summary.warnings += outcome.diagnostics.warning_count();
    }

    let message = format!(
        "{} ({}, {})",
        plural(summary.files, "file", "files"),
        plural(summary.errors, "error", "errors"),
        plural(summary.warnings, "warning", "warnings")
    );
    if summary.has_errors() {
        printer.error("Finished", &message);
    } else {
        printer.success("Finished", &message);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_diagnostic() {
        let diagnostic = Diagnostic::warning(
            DiagnosticKind::ArgumentCount,
            "Not enough arguments (got 1, 2 needed), skipping line",
        )
        .at(7, Some("beams"));

        insta::assert_snapshot!(
            format_diagnostic("trucks/dumper.truck", &diagnostic),
            @"trucks/dumper.truck:7 [beams] Not enough arguments (got 1, 2 needed), skipping line (rigdef::argument-count)"
        );
    }

    #[test]
    fn test_check_counts_diagnostics() {
        let dir = tempdir().unwrap();
        let clean = dir.path().join("clean.truck");
        let broken = dir.path().join("broken.truck");
        fs::write(&clean, "clean\nnodes\n0, 0, 0, 0\n").unwrap();
        fs::write(&broken, "broken\nnodes\n0, 0, 0, 0\nbeams\n0\nengine\n1000, 2000, 1, 3, -1, 0\n").unwrap();

        let args = CheckArgs {
            files: vec![clean, broken],
            config: None,
        };
        let summary = run(args, &Printer::new()).unwrap();

        assert_eq!(
            summary,
            CheckSummary {
                files: 2,
                errors: 1,
                warnings: 1,
            }
        );
        assert!(summary.has_errors());
    }

    #[test]
    fn test_check_missing_file() {
        let dir = tempdir().unwrap();
        let args = CheckArgs {
            files: vec![dir.path().join("missing.truck")],
            config: None,
        };
        assert!(run(args, &Printer::new()).is_err());
    }
}
