//! Dotted key path access into JSON documents

use crate::error::{Error, Result};
use serde_json::Value;

/// Walk `path` through nested objects.
///
/// An empty path returns the document itself. Returns `None` when a segment
/// is missing or when an intermediate value is not an object.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Like [`lookup`], but moves the value out of the document, leaving `null`
/// in its place.
pub fn take_path(value: &mut Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return Some(value.take());
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get_mut(part)?;
            }
            _ => return None,
        }
    }

    Some(current.take())
}

/// Read a link stored under `key`.
///
/// Absent keys and explicit `null` both mean "no link". Any other
/// non-string value is a shape error.
pub fn lookup_link(value: &Value, key: &str) -> Result<Option<String>> {
    match lookup(value, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::shape(key, other)),
    }
}

/// Read a total entry count stored under `key`.
///
/// Accepts non-negative integers and strings holding one. Absent or `null`
/// reads as `None`.
pub fn lookup_count(value: &Value, key: &str) -> Result<Option<u64>> {
    match lookup(value, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| Error::shape(key, &Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::shape(key, &Value::String(s.clone()))),
        Some(other) => Err(Error::shape(key, other)),
    }
}
