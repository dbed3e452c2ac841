//! Per-file checking and report rendering.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::discover::read_document;
use crate::error::{Diagnostic, ParseError, Violation};
use crate::lint::lint;
use crate::validate::validate;

/// How reports are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Result of checking one manifest file.
#[derive(Clone, Debug, Serialize)]
pub struct FileReport {
    pub source: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed { warnings: Vec<Diagnostic> },
    Invalid { violations: Vec<Violation> },
    Unreadable { error: ParseError },
}

impl FileReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed { .. })
    }
}

/// Load, validate and lint one file.
pub fn check_file(path: &Path) -> FileReport {
    let source = path.display().to_string();
    tracing::info!(path = %source, "validating");

    let outcome = match read_document(path) {
        Err(error) => {
            tracing::error!(path = %source, "could not load manifest: {}", error);
            Outcome::Unreadable { error }
        }
        Ok(document) => match validate(&document) {
            Ok(integration) => {
                let warnings = lint(&integration);
                tracing::debug!(
                    path = %source,
                    name = %integration.name,
                    actions = integration.manifest.actions.len(),
                    warnings = warnings.len(),
                    "manifest valid"
                );
                Outcome::Passed { warnings }
            }
            Err(errors) => {
                tracing::error!(path = %source, violations = errors.len(), "validation failed");
                Outcome::Invalid {
                    violations: errors.violations,
                }
            }
        },
    };

    FileReport { source, outcome }
}

/// Check every file, keeping the input order in the result.
pub fn check_files(paths: &[PathBuf], parallel: bool) -> Vec<FileReport> {
    if parallel {
        paths.par_iter().map(|p| check_file(p)).collect()
    } else {
        paths.iter().map(|p| check_file(p)).collect()
    }
}

pub fn any_failed(reports: &[FileReport]) -> bool {
    reports.iter().any(|r| !r.passed())
}

/// Human-readable report: one PASS/FAIL line per file, then its findings.
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        match &report.outcome {
            Outcome::Passed { warnings } => {
                let _ = writeln!(out, "PASS {}", report.source);
                for w in warnings {
                    let _ = writeln!(out, "  warning: {}", w);
                }
            }
            Outcome::Invalid { violations } => {
                let _ = writeln!(
                    out,
                    "FAIL {} ({} violation(s))",
                    report.source,
                    violations.len()
                );
                for v in violations {
                    let _ = writeln!(out, "  {}", v);
                }
            }
            Outcome::Unreadable { error } => {
                let _ = writeln!(out, "FAIL {} (unreadable)", report.source);
                let _ = writeln!(out, "  {}", error);
            }
        }
    }

    let passed = reports.iter().filter(|r| r.passed()).count();
    let _ = writeln!(out, "\n{}/{} manifest(s) passed", passed, reports.len());
    out
}

/// Machine-readable report: a JSON array with one object per file.
pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
