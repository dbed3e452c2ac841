//! Validation of a parsed document against the integration manifest schema.
//!
//! Returns **all** violations, not just the first. Every entity has a check
//! function that visits each declared field in order and appends to a shared
//! accumulator; an entity value is only built when none of its fields failed.
//! Unknown keys are ignored at every level.

use crate::enums::*;
use crate::error::{ValidationErrors, Violation, ViolationKind};
use crate::types::*;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

// ─── Patterns ────────────────────────────────────────────────────────────────

/// Lowercase UUID version 4.
pub const UUID4_PATTERN: &str =
    r"[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}";

/// `Name <email@address.com>`.
pub const AUTHOR_PATTERN: &str =
    r"^[a-zA-Z0-9 ]+<[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}>$";

/// `MAJOR.MINOR.PATCH`.
pub const VERSION_PATTERN: &str = r"^\d+\.\d+\.\d+$";

/// Base64-encoded image data URI.
pub const BASE64_IMAGE_PATTERN: &str =
    r"^data:image\/(png|jpg|jpeg|gif|svg\+xml);base64,[a-zA-Z0-9+/]+={0,2}$";

/// Bare HTTP(S) URL.
pub const URL_PATTERN: &str = r"^https?:\/\/[^\s]+$";

/// Maximum length of `brief_description`, in characters.
pub const BRIEF_DESCRIPTION_MAX_CHARS: usize = 100;

/// Strings longer than this are cut down before being attached to a violation.
const MAX_REPORTED_CHARS: usize = 128;

struct Pattern {
    name: &'static str,
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Every pattern must match the whole string, whether or not it carries
    /// its own anchors.
    fn new(name: &'static str, source: String) -> Self {
        let regex = Regex::new(&format!("^(?:{})$", source)).unwrap();
        Pattern {
            name,
            source,
            regex,
        }
    }
}

static UUID4_RE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("UUID v4", UUID4_PATTERN.to_string()));

static AUTHOR_RE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("author", AUTHOR_PATTERN.to_string()));

static VERSION_RE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("version", VERSION_PATTERN.to_string()));

static LOGO_RE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new("logo", format!("{}|{}", BASE64_IMAGE_PATTERN, URL_PATTERN))
});

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Validate a parsed document and build the typed [`Integration`].
///
/// On failure every violation in the document is returned, in the order the
/// fields were visited. The result is deterministic for a given input.
pub fn validate(document: &Value) -> Result<Integration, ValidationErrors> {
    let mut errors = Vec::new();
    let integration = as_mapping(document, "", &mut errors)
        .and_then(|obj| check_integration(obj, &mut errors));
    match integration {
        Some(integration) if errors.is_empty() => Ok(integration),
        _ => Err(ValidationErrors { violations: errors }),
    }
}

/// `None` means the value failed and its violations are already recorded.
type Checked<T> = Option<T>;

// ─── Integration ─────────────────────────────────────────────────────────────

fn check_integration(obj: &Map<String, Value>, errors: &mut Vec<Violation>) -> Checked<Integration> {
    let path = "";

    let name = required_string(obj, "name", path, errors);
    let product_identifier = required_matching(obj, "product_identifier", path, &UUID4_RE, errors);
    let brief_description = required_string(obj, "brief_description", path, errors).and_then(|s| {
        check_max_chars(&s, BRIEF_DESCRIPTION_MAX_CHARS, "brief_description", errors).then_some(s)
    });
    let description = required_string(obj, "description", path, errors);
    let version = required_matching(obj, "version", path, &VERSION_RE, errors);
    let author = required_matching(obj, "author", path, &AUTHOR_RE, errors);
    let integration_url = optional_string(obj, "integration_url", path, errors);

    let contributor = match obj.get("contributor") {
        None => Some(Vec::new()),
        Some(value) => list_of(value, "contributor", errors, |item, item_path, errors| {
            let s = as_string(item, item_path, errors)?;
            check_pattern(&s, item, item_path, &AUTHOR_RE, errors).then_some(s)
        }),
    };
    let tags = string_list_or_empty(obj, "tags", path, errors);
    let categories = string_list_or_empty(obj, "categories", path, errors);
    let enabled = match obj.get("enabled") {
        None => Some(true),
        Some(value) => as_bool(value, "enabled", errors),
    };
    let license = optional_string(obj, "license", path, errors);

    let manifest = required(obj, "manifest", path, errors)
        .and_then(|value| as_mapping(value, "manifest", errors))
        .and_then(|manifest| check_manifest(manifest, "manifest", errors));

    let logo = match optional(obj, "logo") {
        None => Some(None),
        Some(value) => as_string(value, "logo", errors)
            .and_then(|s| check_pattern(&s, value, "logo", &LOGO_RE, errors).then_some(Some(s))),
    };

    Some(Integration {
        name: name?,
        product_identifier: product_identifier?,
        brief_description: brief_description?,
        description: description?,
        version: version?,
        author: author?,
        integration_url: integration_url?,
        contributor: contributor?,
        tags: tags?,
        categories: categories?,
        enabled: enabled?,
        license: license?,
        manifest: manifest?,
        logo: logo?,
    })
}

// ─── Manifest ────────────────────────────────────────────────────────────────

fn check_manifest(
    obj: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Manifest> {
    let actions = required(obj, "actions", path, errors).and_then(|value| {
        non_empty_list_of(value, &child(path, "actions"), "action", errors, check_action)
    });
    let configuration = required(obj, "configuration", path, errors)
        .and_then(|value| configuration_map(value, &child(path, "configuration"), errors));

    Some(Manifest {
        actions: actions?,
        configuration: configuration?,
    })
}

// ─── Action ──────────────────────────────────────────────────────────────────

fn check_action(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<Action> {
    let obj = as_mapping(value, path, errors)?;

    let friendly_name = required_string(obj, "friendly_name", path, errors);
    let name = required_string(obj, "name", path, errors);
    let description = required_string(obj, "description", path, errors);
    let action_type = required_member::<ActionType>(obj, "type", path, errors);
    let run_from = required_member::<RunFrom>(obj, "run_from", path, errors);

    let configuration = match optional(obj, "configuration") {
        None => Some(None),
        Some(value) => configuration_map(value, &child(path, "configuration"), errors).map(Some),
    };
    let parameters = match optional(obj, "parameters") {
        None => Some(None),
        Some(value) => {
            map_of(value, &child(path, "parameters"), errors, check_parameter_field).map(Some)
        }
    };
    let trigger = required(obj, "trigger", path, errors).and_then(|value| {
        non_empty_list_of(value, &child(path, "trigger"), "trigger", errors, member::<Trigger>)
    });
    let tags = match optional(obj, "tags") {
        None => Some(None),
        Some(value) => string_list(value, &child(path, "tags"), errors).map(Some),
    };
    let source_object_type = match optional(obj, "source_object_type") {
        None => Some(None),
        Some(value) => {
            one_or_many(
                value,
                &child(path, "source_object_type"),
                errors,
                member::<SourceObjectType>,
            ).map(Some)
        }
    };

    Some(Action {
        friendly_name: friendly_name?,
        name: name?,
        description: description?,
        action_type: action_type?,
        run_from: run_from?,
        configuration: configuration?,
        parameters: parameters?,
        trigger: trigger?,
        tags: tags?,
        source_object_type: source_object_type?,
    })
}

// ─── Fields ──────────────────────────────────────────────────────────────────

fn configuration_map(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<BTreeMap<String, ConfigurationField>> {
    map_of(value, path, errors, check_configuration_field)
}

fn check_configuration_field(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<ConfigurationField> {
    let obj = as_mapping(value, path, errors)?;

    // Open string: not restricted to ConfigFieldType.
    let field_type = required_string(obj, "type", path, errors);
    let label = required_string(obj, "label", path, errors);
    let is_required = nullable_bool_or(obj, "required", path, false, errors);
    let secret = nullable_bool_or(obj, "secret", path, false, errors);
    let default = optional(obj, "default").cloned();
    let description = required_string(obj, "description", path, errors);
    let options = match obj.get("options") {
        None => Some(Vec::new()),
        Some(value) => options_list(value, &child(path, "options"), errors),
    };
    let conditions = optional_conditions(obj, path, errors);
    let rows = optional_integer(obj, "rows", path, errors);
    let min = optional_integer(obj, "min", path, errors);
    let max = optional_integer(obj, "max", path, errors);

    Some(ConfigurationField {
        field_type: field_type?,
        label: label?,
        required: is_required?,
        secret: secret?,
        default,
        description: description?,
        options: options?,
        conditions: conditions?,
        rows: rows?,
        min: min?,
        max: max?,
    })
}

fn check_parameter_field(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<ParameterField> {
    let obj = as_mapping(value, path, errors)?;

    let field_type = required_member::<ConfigFieldType>(obj, "type", path, errors);
    let label = required_string(obj, "label", path, errors);
    let is_required = nullable_bool_or(obj, "required", path, false, errors);
    let default_options_from = optional_string(obj, "default_options_from", path, errors);
    let observable_data_type = match optional(obj, "observable_data_type") {
        None => Some(None),
        Some(value) => {
            one_or_many(value, &child(path, "observable_data_type"), errors, as_string).map(Some)
        }
    };
    let description = required_string(obj, "description", path, errors);
    let options = match optional(obj, "options") {
        None => Some(None),
        Some(value) => options_list(value, &child(path, "options"), errors).map(Some),
    };
    let conditions = optional_conditions(obj, path, errors);

    Some(ParameterField {
        field_type: field_type?,
        label: label?,
        required: is_required?,
        default_options_from: default_options_from?,
        observable_data_type: observable_data_type?,
        description: description?,
        options: options?,
        conditions: conditions?,
    })
}

fn optional_conditions(
    obj: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Option<Vec<FieldCondition>>> {
    match optional(obj, "conditions") {
        None => Some(None),
        Some(value) => list_of(value, &child(path, "conditions"), errors, check_condition).map(Some),
    }
}

fn check_condition(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<FieldCondition> {
    let obj = as_mapping(value, path, errors)?;

    let field = required_string(obj, "field", path, errors);
    let operator = required_member::<ConditionOperator>(obj, "operator", path, errors);
    let condition_value = required(obj, "value", path, errors)
        .and_then(|value| as_condition_value(value, &child(path, "value"), errors));

    Some(FieldCondition {
        field: field?,
        operator: operator?,
        value: condition_value?,
    })
}

fn as_condition_value(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<ConditionValue> {
    match value {
        Value::String(s) => Some(ConditionValue::String(s.clone())),
        Value::Bool(b) => Some(ConditionValue::Bool(*b)),
        Value::Number(n) if !n.is_f64() => {
            as_integer(value, path, errors).map(ConditionValue::Integer)
        }
        other => {
            type_mismatch(other, path, "string, integer or boolean", errors);
            None
        }
    }
}

/// A list of `{label: ..., value: ...}` style mappings with string values.
fn options_list(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Vec<FieldOption>> {
    list_of(value, path, errors, |item, item_path, errors| {
        let obj = as_mapping(item, item_path, errors)?;
        let mut option = FieldOption::new();
        let mut ok = true;
        for (key, entry) in obj {
            match as_string(entry, &child(item_path, key), errors) {
                Some(s) => {
                    option.insert(key.clone(), s);
                }
                None => ok = false,
            }
        }
        ok.then_some(option)
    })
}

// ─── Field lookup ────────────────────────────────────────────────────────────

/// Look up a required field, recording a violation when it is absent.
/// A present `null` is returned so the caller's type check reports it.
fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Option<&'a Value> {
    let value = obj.get(key);
    if value.is_none() {
        errors.push(Violation {
            kind: ViolationKind::MissingRequiredField,
            path: child(path, key),
            message: "required field missing".to_string(),
            invalid_value: None,
        });
    }
    value
}

/// Look up an optional field; absence and `null` both mean "not set".
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<String> {
    let value = required(obj, key, path, errors)?;
    as_string(value, &child(path, key), errors)
}

fn required_matching(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    pattern: &Pattern,
    errors: &mut Vec<Violation>,
) -> Checked<String> {
    let field_path = child(path, key);
    let value = required(obj, key, path, errors)?;
    let s = as_string(value, &field_path, errors)?;
    check_pattern(&s, value, &field_path, pattern, errors).then_some(s)
}

fn required_member<T: Enumerated>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<T> {
    let value = required(obj, key, path, errors)?;
    member(value, &child(path, key), errors)
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Option<String>> {
    match optional(obj, key) {
        None => Some(None),
        Some(value) => as_string(value, &child(path, key), errors).map(Some),
    }
}

fn optional_integer(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Option<i64>> {
    match optional(obj, key) {
        None => Some(None),
        Some(value) => as_integer(value, &child(path, key), errors).map(Some),
    }
}

/// A boolean flag where both absence and `null` fall back to `default`.
fn nullable_bool_or(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    default: bool,
    errors: &mut Vec<Violation>,
) -> Checked<bool> {
    match optional(obj, key) {
        None => Some(default),
        Some(value) => as_bool(value, &child(path, key), errors),
    }
}

/// A string list that defaults to empty when absent; `null` is a type mismatch.
fn string_list_or_empty(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<Vec<String>> {
    match obj.get(key) {
        None => Some(Vec::new()),
        Some(value) => string_list(value, &child(path, key), errors),
    }
}

fn string_list(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<Vec<String>> {
    list_of(value, path, errors, as_string)
}

// ─── Shapes ──────────────────────────────────────────────────────────────────

fn as_mapping<'a>(
    value: &'a Value,
    path: &str,
    errors: &mut Vec<Violation>,
) -> Checked<&'a Map<String, Value>> {
    let obj = value.as_object();
    if obj.is_none() {
        type_mismatch(value, path, "mapping", errors);
    }
    obj
}

fn as_string(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            type_mismatch(other, path, "string", errors);
            None
        }
    }
}

fn as_bool(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<bool> {
    let b = value.as_bool();
    if b.is_none() {
        type_mismatch(value, path, "boolean", errors);
    }
    b
}

fn as_integer(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<i64> {
    let n = value.as_i64();
    if n.is_none() {
        if value.is_u64() {
            errors.push(Violation {
                kind: ViolationKind::BoundViolation,
                path: path.to_string(),
                message: format!("must be at most {}", i64::MAX),
                invalid_value: reportable(value),
            });
        } else {
            type_mismatch(value, path, "integer", errors);
        }
    }
    n
}

/// Check each element of a list independently; siblings of a failed
/// element are still checked.
fn list_of<T>(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
    mut check: impl FnMut(&Value, &str, &mut Vec<Violation>) -> Checked<T>,
) -> Checked<Vec<T>> {
    let Some(items) = value.as_array() else {
        type_mismatch(value, path, "list", errors);
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    let mut ok = true;
    for (i, item) in items.iter().enumerate() {
        match check(item, &format!("{}[{}]", path, i), errors) {
            Some(v) => out.push(v),
            None => ok = false,
        }
    }
    ok.then_some(out)
}

fn non_empty_list_of<T>(
    value: &Value,
    path: &str,
    item_name: &str,
    errors: &mut Vec<Violation>,
    check: impl FnMut(&Value, &str, &mut Vec<Violation>) -> Checked<T>,
) -> Checked<Vec<T>> {
    if value.as_array().is_some_and(|items| items.is_empty()) {
        errors.push(Violation {
            kind: ViolationKind::BoundViolation,
            path: path.to_string(),
            message: format!("must contain at least one {}", item_name),
            invalid_value: None,
        });
        return None;
    }
    list_of(value, path, errors, check)
}

/// Check each value of a mapping independently, keyed by name in the path.
fn map_of<T>(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
    mut check: impl FnMut(&Value, &str, &mut Vec<Violation>) -> Checked<T>,
) -> Checked<BTreeMap<String, T>> {
    let obj = as_mapping(value, path, errors)?;
    let mut out = BTreeMap::new();
    let mut ok = true;
    for (key, entry) in obj {
        match check(entry, &child(path, key), errors) {
            Some(v) => {
                out.insert(key.clone(), v);
            }
            None => ok = false,
        }
    }
    ok.then_some(out)
}

/// Either a single item or a list of items.
fn one_or_many<T>(
    value: &Value,
    path: &str,
    errors: &mut Vec<Violation>,
    mut check: impl FnMut(&Value, &str, &mut Vec<Violation>) -> Checked<T>,
) -> Checked<OneOrMany<T>> {
    match value {
        Value::Array(_) => list_of(value, path, errors, check).map(OneOrMany::Many),
        Value::String(_) => check(value, path, errors).map(OneOrMany::One),
        other => {
            type_mismatch(other, path, "string or list", errors);
            None
        }
    }
}

// ─── Constraints ─────────────────────────────────────────────────────────────

fn check_pattern(
    s: &str,
    value: &Value,
    path: &str,
    pattern: &Pattern,
    errors: &mut Vec<Violation>,
) -> bool {
    let ok = pattern.regex.is_match(s);
    if !ok {
        errors.push(Violation {
            kind: ViolationKind::PatternMismatch,
            path: path.to_string(),
            message: format!("must match {} pattern {}", pattern.name, pattern.source),
            invalid_value: reportable(value),
        });
    }
    ok
}

fn member<T: Enumerated>(value: &Value, path: &str, errors: &mut Vec<Violation>) -> Checked<T> {
    let s = as_string(value, path, errors)?;
    let resolved = T::from_wire(&s);
    if resolved.is_none() {
        errors.push(Violation {
            kind: ViolationKind::EnumerationMismatch,
            path: path.to_string(),
            message: format!("must be one of {{{}}}", T::VARIANTS.join(", ")),
            invalid_value: reportable(value),
        });
    }
    resolved
}

fn check_max_chars(s: &str, max: usize, path: &str, errors: &mut Vec<Violation>) -> bool {
    let len = s.chars().count();
    let ok = len <= max;
    if !ok {
        errors.push(Violation {
            kind: ViolationKind::BoundViolation,
            path: path.to_string(),
            message: format!("must be at most {} characters, got {}", max, len),
            invalid_value: reportable(&Value::String(s.to_string())),
        });
    }
    ok
}

// ─── Reporting helpers ───────────────────────────────────────────────────────

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn type_mismatch(value: &Value, path: &str, expected: &str, errors: &mut Vec<Violation>) {
    errors.push(Violation {
        kind: ViolationKind::TypeMismatch,
        path: path.to_string(),
        message: format!("expected {}, got {}", expected, type_name(value)),
        invalid_value: reportable(value),
    });
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Scalars are attached as-is (long strings are shortened); lists and
/// mappings are only named in the message.
fn reportable(value: &Value) -> Option<Value> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        Value::String(s) if s.chars().count() > MAX_REPORTED_CHARS => {
            let mut short: String = s.chars().take(MAX_REPORTED_CHARS).collect();
            short.push_str("...");
            Some(Value::String(short))
        }
        other => Some(other.clone()),
    }
}
