//! Optional scalar lookups

use super::lists::as_int;
use crate::json::search;
use crate::types::JsonValue;

/// String at `path`, if present and a string
pub fn optional_string(value: &JsonValue, path: &str) -> Option<String> {
    match search(value, path)? {
        JsonValue::String(s) => Some(s),
        _ => None,
    }
}

/// Integer at `path`
pub fn optional_i64(value: &JsonValue, path: &str) -> Option<i64> {
    as_int(&search(value, path)?)
}

/// Number at `path`
pub fn optional_f64(value: &JsonValue, path: &str) -> Option<f64> {
    search(value, path)?.as_f64()
}

/// Boolean at `path`
pub fn optional_bool(value: &JsonValue, path: &str) -> Option<bool> {
    search(value, path)?.as_bool()
}
