use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::*;

/// One selectable option of a field, e.g. `{"label": "High", "value": "high"}`.
pub type FieldOption = BTreeMap<String, String>;

// ─── Integration ─────────────────────────────────────────────────────────────

/// The root of a validated integration manifest file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Integration {
    pub name: String,
    pub product_identifier: String,
    pub brief_description: String,
    pub description: String,
    pub version: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_url: Option<String>,
    pub contributor: Vec<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub manifest: Manifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

// ─── Manifest ────────────────────────────────────────────────────────────────

/// Actions and integration-level settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Manifest {
    pub actions: Vec<Action>,
    pub configuration: BTreeMap<String, ConfigurationField>,
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// One invocable capability of the integration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Action {
    pub friendly_name: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub run_from: RunFrom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<BTreeMap<String, ConfigurationField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, ParameterField>>,
    pub trigger: Vec<Trigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_object_type: Option<OneOrMany<SourceObjectType>>,
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// A setting supplied by an administrator, at integration or action level.
///
/// `field_type` is deliberately an open string; see [`ConfigurationField::known_type`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfigurationField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub required: bool,
    pub secret: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: String,
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<FieldCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl ConfigurationField {
    /// The declared type, if it is one of the recognised [`ConfigFieldType`] values.
    pub fn known_type(&self) -> Option<ConfigFieldType> {
        ConfigFieldType::from_wire(&self.field_type)
    }
}

/// A runtime input supplied by the user invoking an action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterField {
    #[serde(rename = "type")]
    pub field_type: ConfigFieldType,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_options_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observable_data_type: Option<OneOrMany<String>>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<FieldCondition>>,
}

/// Shows or hides a field depending on another field's value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldCondition {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

/// Right-hand side of a [`FieldCondition`].
///
/// Not checked against the operator: `contains` with a boolean is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    String(String),
    Integer(i64),
    Bool(bool),
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// A value that may be written either as a single item or as a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// All items, regardless of which form was written.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }
}
