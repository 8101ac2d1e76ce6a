//! Helpers for reading loosely typed event payloads.
//!
//! Proxy events come from a system we do not control: keys may be missing,
//! `null`, or carry numbers where strings are expected. These helpers read
//! what is there and never fail.

use serde_json::Value;
use std::collections::HashMap;

/// Renders a scalar JSON value as a string.
///
/// Returns `None` for `null`, arrays and objects.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads `key` from `event` as a string, if it is a scalar.
#[must_use]
pub fn string_field(event: &Value, key: &str) -> Option<String> {
    event.get(key).and_then(scalar_to_string)
}

/// Reads `key` from `event` as a string map.
///
/// A missing key, `null`, or a non-object value gives an empty map. Entries
/// whose value is not a scalar are skipped.
#[must_use]
pub fn string_map(event: &Value, key: &str) -> HashMap<String, String> {
    event
        .get(key)
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|v| (k.clone(), v)))
                .collect()
        })
        .unwrap_or_default()
}
