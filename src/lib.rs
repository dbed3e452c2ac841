//! Schema validation for integration manifests.
//!
//! An integration manifest describes a third-party integration: its metadata,
//! the actions it exposes, and the configuration and parameter fields those
//! actions take. This crate checks a parsed manifest against the fixed schema
//! and either returns a fully-typed [`Integration`] or every violation found:
//!
//! ```text
//! parse(text) → Value → validate(&value) → Integration → lint(&integration) → warnings
//!                                        ↘ ValidationErrors
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use integration_manifest::parse::Format;
//!
//! let json = r#"{
//!   "name": "Example",
//!   "product_identifier": "2f1e4c3a-9b8d-4e7f-a6b5-c4d3e2f1a0b9",
//!   "brief_description": "An example integration",
//!   "description": "Longer description",
//!   "version": "1.0.0",
//!   "author": "Jane Doe <jane@example.com>",
//!   "manifest": {
//!     "actions": [{
//!       "friendly_name": "Lookup",
//!       "name": "lookup",
//!       "description": "Look something up",
//!       "type": "action",
//!       "run_from": "console",
//!       "trigger": ["manual"]
//!     }],
//!     "configuration": {}
//!   }
//! }"#;
//!
//! let result = integration_manifest::load(json, Format::Json).expect("valid manifest");
//! assert!(result.integration.enabled);
//! ```

pub mod discover;
pub mod enums;
pub mod error;
pub mod lint;
pub mod parse;
pub mod report;
pub mod serialize;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use lint::lint;
pub use parse::parse;
pub use validate::validate;

/// Result of the [`load`] convenience entry point.
pub struct LoadResult {
    /// The validated integration, with defaults applied.
    pub integration: Integration,
    /// Non-fatal warnings produced by lint.
    pub warnings: Vec<Diagnostic>,
}

/// Convenience entry point composing parse → validate → lint.
///
/// # Errors
///
/// Returns `Err(Vec<ManifestError>)` holding the parse error, or every
/// validation violation found.
///
/// # Example
///
/// ```rust
/// use integration_manifest::parse::Format;
///
/// match integration_manifest::load("{}", Format::Json) {
///     Ok(result) => println!("Loaded with {} warnings", result.warnings.len()),
///     Err(errors) => eprintln!("{} errors", errors.len()),
/// }
/// ```
pub fn load(input: &str, format: parse::Format) -> Result<LoadResult, Vec<ManifestError>> {
    let document = parse::parse(input, format).map_err(|e| vec![ManifestError::Parse(e)])?;

    let integration = validate::validate(&document).map_err(|errors| {
        errors
            .into_iter()
            .map(ManifestError::Validation)
            .collect::<Vec<_>>()
    })?;

    let warnings = lint::lint(&integration);
    Ok(LoadResult {
        integration,
        warnings,
    })
}
