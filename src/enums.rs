//! Closed enumerations used throughout the manifest type system.
//!
//! These are "closed" enums: only the defined variants are valid. The one open
//! enumeration, `ConfigurationField::type`, is kept as a plain string and is
//! checked against [`ConfigFieldType`] only by [`crate::lint`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A closed enumeration with a fixed set of wire values.
pub trait Enumerated: DeserializeOwned {
    /// Every accepted wire value, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Resolve a wire value to its member, or `None` if it is not one.
    fn from_wire(value: &str) -> Option<Self> {
        serde_json::from_value(Value::String(value.to_string())).ok()
    }
}

/// Field types a parameter field may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigFieldType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "str-select")]
    StrSelect,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "str-multiple")]
    StrMultiple,
}

impl Enumerated for ConfigFieldType {
    const VARIANTS: &'static [&'static str] = &["int", "str", "str-select", "bool", "str-multiple"];
}

/// Kind of capability an action provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Inventory,
    Action,
    Input,
    Webhook,
    Intel,
    Output,
}

impl Enumerated for ActionType {
    const VARIANTS: &'static [&'static str] =
        &["inventory", "action", "input", "webhook", "intel", "output"];
}

/// What may start an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Manual,
    Schedule,
    EventRule,
    System,
}

impl Enumerated for Trigger {
    const VARIANTS: &'static [&'static str] = &["manual", "schedule", "event_rule", "system"];
}

/// Object kinds an action can be launched from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceObjectType {
    Event,
    Case,
    Observable,
    Asset,
    File,
}

impl Enumerated for SourceObjectType {
    const VARIANTS: &'static [&'static str] = &["event", "case", "observable", "asset", "file"];
}

/// Where an action executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunFrom {
    Console,
    Agent,
}

impl Enumerated for RunFrom {
    const VARIANTS: &'static [&'static str] = &["console", "agent"];
}

/// Comparison applied by a field condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    StartsWith,
    EndsWith,
}

impl Enumerated for ConditionOperator {
    const VARIANTS: &'static [&'static str] = &[
        "eq",
        "ne",
        "gt",
        "gte",
        "lt",
        "lte",
        "contains",
        "startswith",
        "endswith",
    ];
}

