//! Structural checks for nested records
//!
//! Strict JSON typing, unknown properties, container shapes and array
//! cardinality. Everything reported here is a blocker; leaves that fail their
//! type check are withheld from the rule registry.

use serde_json::{Map, Value};

use crate::field::{FieldKind, ValueType};

/// Cardinality bounds of a nested array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
}

pub const ZONE_ROOF: Cardinality = Cardinality { name: "zone_roof", min: 1, max: 2 };
pub const ZONE_FLOOR: Cardinality = Cardinality { name: "zone_floor", min: 1, max: 2 };
pub const ZONE_WALL: Cardinality = Cardinality { name: "zone_wall", min: 1, max: 4 };
pub const HVAC: Cardinality = Cardinality { name: "hvac", min: 1, max: 2 };
pub const DUCT: Cardinality = Cardinality { name: "duct", min: 0, max: 3 };

/// JSON type name used in structural messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_type(expected: ValueType, value: &Value) -> bool {
    match expected {
        ValueType::Integer => value
            .as_f64()
            .is_some_and(|v| v.fract() == 0.0),
        ValueType::Number => value.is_number(),
        ValueType::String => value.is_string(),
        ValueType::Boolean => value.is_boolean(),
    }
}

/// Strict type check for a leaf; null counts as not supplied
pub fn check_leaf(kind: FieldKind, value: &Value) -> Option<String> {
    if value.is_null() {
        return None;
    }
    let spec = kind.spec();
    if matches_type(spec.value_type, value) {
        return None;
    }
    Some(match spec.type_message {
        Some(message) => message.to_string(),
        None => format!(
            "{} must be of type {}",
            spec.nested,
            spec.value_type.as_str()
        ),
    })
}

pub fn additional_property(name: &str) -> String {
    format!("Additional property {} is not allowed", name)
}

pub fn wrong_container(name: &str, expected: &str, value: &Value) -> String {
    format!("{} must be of type {} (found {})", name, expected, json_type_name(value))
}

/// Check an array's cardinality; `None` when it is within bounds
pub fn check_cardinality(bounds: Cardinality, items: &[Value]) -> Option<String> {
    if items.len() < bounds.min {
        Some(format!(
            "{} must contain at least {} item{}",
            bounds.name,
            bounds.min,
            if bounds.min == 1 { "" } else { "s" }
        ))
    } else if items.len() > bounds.max {
        Some(format!("{} must contain at most {} items", bounds.name, bounds.max))
    } else {
        None
    }
}

/// Keys of `object` that are neither leaves of `kinds` nor allowed children
pub fn unknown_keys<'a>(
    object: &'a Map<String, Value>,
    leaves: &[FieldKind],
    children: &[&str],
) -> Vec<&'a str> {
    object
        .keys()
        .map(String::as_str)
        .filter(|key| !children.contains(key) && !leaves.iter().any(|k| k.spec().nested == *key))
        .collect()
}
