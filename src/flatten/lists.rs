//! Array projections

use crate::json::search;
use crate::types::JsonValue;

fn array_at(value: &JsonValue, path: &str) -> Vec<JsonValue> {
    match search(value, path) {
        Some(JsonValue::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Strings of the array at `path`
pub fn string_list(value: &JsonValue, path: &str) -> Vec<String> {
    array_at(value, path)
        .into_iter()
        .filter_map(|v| match v {
            JsonValue::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Integers of the array at `path`.
///
/// Whole floats such as `3.0` are accepted.
pub fn int_list(value: &JsonValue, path: &str) -> Vec<i64> {
    array_at(value, path)
        .iter()
        .filter_map(as_int)
        .collect()
}

/// Booleans of the array at `path`
pub fn bool_list(value: &JsonValue, path: &str) -> Vec<bool> {
    array_at(value, path)
        .iter()
        .filter_map(JsonValue::as_bool)
        .collect()
}

/// Numbers of the array at `path`
pub fn float_list(value: &JsonValue, path: &str) -> Vec<f64> {
    array_at(value, path)
        .iter()
        .filter_map(JsonValue::as_f64)
        .collect()
}

/// Convert every element of the array at `path` with `f`
pub fn object_list<T, F>(value: &JsonValue, path: &str, f: F) -> Vec<T>
where
    F: Fn(&JsonValue) -> T,
{
    array_at(value, path).iter().map(f).collect()
}

/// Wrap the object at `path` into a list of zero or one element.
///
/// Nested optional blocks are modelled as single-element lists in resource
/// state.
pub fn object_to_list<T, F>(value: &JsonValue, path: &str, f: F) -> Vec<T>
where
    F: FnOnce(&JsonValue) -> T,
{
    match search(value, path) {
        Some(v @ JsonValue::Object(_)) => vec![f(&v)],
        _ => Vec::new(),
    }
}

pub(super) fn as_int(v: &JsonValue) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    v.as_f64()
        .filter(|f| f.fract() == 0.0 && f.is_finite())
        .map(|f| f as i64)
}
