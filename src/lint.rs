//! Non-fatal checks over an already-validated [`Integration`].
//!
//! Lint never changes whether a manifest passes; it only reports references
//! and field types that are accepted by the schema but are probably mistakes.
//!
//! | Code  | Finding |
//! |-------|---------|
//! | W-001 | configuration field `type` is not a recognised field type |
//! | W-002 | `default_options_from` names no known configuration field |
//! | W-003 | a condition refers to a field that does not exist |

use crate::enums::{ConfigFieldType, Enumerated};
use crate::error::{Diagnostic, DiagnosticSeverity};
use crate::types::*;
use std::collections::{BTreeMap, HashSet};

/// Run every lint rule and return the warnings found.
pub fn lint(integration: &Integration) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    let manifest = &integration.manifest;
    let global: HashSet<&str> = manifest.configuration.keys().map(String::as_str).collect();

    check_configuration(
        &manifest.configuration,
        "manifest.configuration",
        &HashSet::new(),
        &mut warnings,
    );

    for (i, action) in manifest.actions.iter().enumerate() {
        let prefix = format!("manifest.actions[{}]", i);

        let mut action_config: HashSet<&str> = HashSet::new();
        if let Some(configuration) = &action.configuration {
            action_config.extend(configuration.keys().map(String::as_str));
            check_configuration(
                configuration,
                &format!("{}.configuration", prefix),
                &global,
                &mut warnings,
            );
        }

        if let Some(parameters) = &action.parameters {
            let visible: HashSet<&str> = action_config.union(&global).copied().collect();
            let siblings: HashSet<&str> = parameters.keys().map(String::as_str).collect();
            for (name, param) in parameters {
                let path = format!("{}.parameters.{}", prefix, name);
                w002_default_options_from(param, &path, &action_config, &global, &mut warnings);
                if let Some(conditions) = &param.conditions {
                    w003_condition_refs(conditions, &path, &siblings, &visible, &mut warnings);
                }
            }
        }
    }

    warnings
}

fn check_configuration(
    fields: &BTreeMap<String, ConfigurationField>,
    prefix: &str,
    outer: &HashSet<&str>,
    warnings: &mut Vec<Diagnostic>,
) {
    let siblings: HashSet<&str> = fields.keys().map(String::as_str).collect();
    for (name, field) in fields {
        let path = format!("{}.{}", prefix, name);
        w001_config_field_type(field, &path, warnings);
        if let Some(conditions) = &field.conditions {
            w003_condition_refs(conditions, &path, &siblings, outer, warnings);
        }
    }
}

// ─── W-001 ──────────────────────────────────────────────────────────────────

fn w001_config_field_type(field: &ConfigurationField, path: &str, warnings: &mut Vec<Diagnostic>) {
    if field.known_type().is_none() {
        warnings.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: "W-001".to_string(),
            path: Some(format!("{}.type", path)),
            message: format!(
                "unrecognised configuration field type '{}', expected one of {{{}}}",
                field.field_type,
                ConfigFieldType::VARIANTS.join(", ")
            ),
        });
    }
}

// ─── W-002 ──────────────────────────────────────────────────────────────────

fn w002_default_options_from(
    param: &ParameterField,
    path: &str,
    action_config: &HashSet<&str>,
    global: &HashSet<&str>,
    warnings: &mut Vec<Diagnostic>,
) {
    if let Some(source) = &param.default_options_from
        && !action_config.contains(source.as_str())
        && !global.contains(source.as_str())
    {
        warnings.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: "W-002".to_string(),
            path: Some(format!("{}.default_options_from", path)),
            message: format!("'{}' is not a configuration field of this action or integration", source),
        });
    }
}

// ─── W-003 ──────────────────────────────────────────────────────────────────

fn w003_condition_refs(
    conditions: &[FieldCondition],
    path: &str,
    siblings: &HashSet<&str>,
    outer: &HashSet<&str>,
    warnings: &mut Vec<Diagnostic>,
) {
    for (i, condition) in conditions.iter().enumerate() {
        let target = condition.field.as_str();
        if !siblings.contains(target) && !outer.contains(target) {
            warnings.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                code: "W-003".to_string(),
                path: Some(format!("{}.conditions[{}].field", path, i)),
                message: format!("condition refers to unknown field '{}'", target),
            });
        }
    }
}
