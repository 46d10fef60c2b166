//! Nested property access over raw management-API documents.
//!
//! Every lookup that does not resolve yields `None` (or the caller's default)
//! instead of failing. Settings documents mix nested objects with flat dotted
//! keys (`{"transient": {"cluster.routing.allocation.enable": "none"}}`), so a
//! path is resolved by trying the remaining dotted path as a literal key at
//! every level before descending.

use crate::error::{ClusterError, Result};
use serde_json::{Map, Value};

/// Resolve `path` (dot separated) inside `value`.
///
/// Explicit JSON `null` is treated the same as an absent key.
pub fn get_property<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    if let Some(found) = object.get(path).filter(|v| !v.is_null()) {
        return Some(found);
    }
    for (pos, _) in path.match_indices('.') {
        let (head, tail) = (&path[..pos], &path[pos + 1..]);
        if let Some(found) = object.get(head).and_then(|child| get_property(child, tail)) {
            return Some(found);
        }
    }
    None
}

/// Read an unsigned integer, accepting numbers encoded as strings.
pub fn get_u64(value: &Value, path: &str, default: u64) -> u64 {
    get_property(value, path).and_then(as_u64).unwrap_or(default)
}

/// Read a signed integer, accepting numbers encoded as strings.
pub fn get_i64(value: &Value, path: &str, default: i64) -> i64 {
    get_property(value, path).and_then(as_i64).unwrap_or(default)
}

/// Read a float, accepting numbers encoded as strings.
pub fn get_f64(value: &Value, path: &str, default: f64) -> f64 {
    get_property(value, path).and_then(as_f64).unwrap_or(default)
}

pub fn get_str<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    get_property(value, path).and_then(Value::as_str)
}

/// Read a string, falling back to `default` when absent or not a string.
pub fn get_string(value: &Value, path: &str, default: &str) -> String {
    get_str(value, path).unwrap_or(default).to_string()
}

/// Read a boolean, accepting `"true"`/`"false"` strings.
pub fn get_bool(value: &Value, path: &str, default: bool) -> bool {
    match get_property(value, path) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Resolve a path that the builder cannot default.
pub fn require_object<'a>(
    value: &'a Value,
    document: &'static str,
    path: &str,
) -> Result<&'a Map<String, Value>> {
    get_property(value, path)
        .and_then(Value::as_object)
        .ok_or_else(|| ClusterError::invalid(document, path))
}

/// Resolve an optional object path; absent means empty.
pub fn object_or_empty<'a>(value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
    get_property(value, path).and_then(Value::as_object)
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
