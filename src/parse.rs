use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;
use std::path::Path;

/// Text encoding of a manifest file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Parse text into an unvalidated document.
///
/// Performs syntax parsing only. Does NOT check the document against the
/// manifest schema; any well-formed value is returned, whatever its shape.
pub fn parse(input: &str, format: Format) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Empty,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    match format {
        Format::Json => serde_json::from_str(input).map_err(|e| ParseError {
            kind: ParseErrorKind::Syntax,
            message: e.to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
        }),
        Format::Yaml => serde_saphyr::from_str(input).map_err(|e| ParseError {
            kind: ParseErrorKind::Syntax,
            message: e.to_string(),
            line: None,
            column: None,
        }),
    }
}
