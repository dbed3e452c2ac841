//! Manifest file discovery and loading.

use anyhow::{Context, Result, bail};
use glob::MatchOptions;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, ParseErrorKind};
use crate::parse::{Format, parse};

/// Where to look for manifest files.
#[derive(Clone, Debug)]
pub struct DiscoverOptions {
    /// Directory the pattern is resolved against.
    pub dir: PathBuf,
    /// File name glob, e.g. `*.json`.
    pub pattern: String,
    /// Also search every subdirectory of `dir`.
    pub recursive: bool,
}

/// Extensions a manifest pattern may end in; matched case-sensitively.
const MANIFEST_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Dotfiles and dot-directories are never matched.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Expand the configured glob and return matching files, sorted.
///
/// # Errors
///
/// Fails when the pattern does not name a supported manifest extension or is
/// not a valid glob. Unreadable directory entries are skipped with a warning.
pub fn discover(options: &DiscoverOptions) -> Result<Vec<PathBuf>> {
    let extension = Path::new(&options.pattern)
        .extension()
        .and_then(|ext| ext.to_str());
    if !extension.is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext)) {
        bail!(
            "manifest pattern '{}' must end in .json, .yaml or .yml",
            options.pattern
        );
    }

    let full = if options.recursive {
        options.dir.join("**").join(&options.pattern)
    } else {
        options.dir.join(&options.pattern)
    };
    let full = full.to_string_lossy();

    tracing::debug!(pattern = %full, "expanding manifest glob");

    let mut paths = Vec::new();
    for entry in glob::glob_with(&full, MATCH_OPTIONS).context("invalid manifest glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!(path = %e.path().display(), "skipping unreadable entry: {}", e),
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and parse one manifest file.
///
/// Files whose extension is not recognised are parsed as JSON.
pub fn read_document(path: &Path) -> Result<Value, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|e| ParseError {
        kind: ParseErrorKind::Io,
        message: format!("failed to read {}: {}", path.display(), e),
        line: None,
        column: None,
    })?;
    parse(&text, Format::from_path(path).unwrap_or(Format::Json))
}
