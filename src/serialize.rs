//! [`Integration`] → JSON / YAML serialization.
//!
//! Defaults are written out explicitly and unset optional fields are omitted,
//! so the output validates back to an equal value.

use crate::error::SerializeError;
use crate::types::Integration;

/// Serialize an integration to pretty-printed JSON.
pub fn to_json(integration: &Integration) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(integration).map_err(|e| SerializeError {
        message: format!("failed to serialize to JSON: {}", e),
    })
}

/// Serialize an integration to YAML.
pub fn to_yaml(integration: &Integration) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(integration).map_err(|e| SerializeError {
        message: format!("failed to convert integration to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}
