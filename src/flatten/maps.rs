//! Object projections

use super::lists::as_int;
use crate::json::search;
use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeMap;

fn object_at(value: &JsonValue, path: &str) -> JsonObject {
    match search(value, path) {
        Some(JsonValue::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

fn project<T>(
    value: &JsonValue,
    path: &str,
    f: impl Fn(&JsonValue) -> Option<T>,
) -> BTreeMap<String, T> {
    object_at(value, path)
        .into_iter()
        .filter_map(|(k, v)| f(&v).map(|t| (k, t)))
        .collect()
}

/// String members of the object at `path`
pub fn string_map(value: &JsonValue, path: &str) -> BTreeMap<String, String> {
    project(value, path, |v| v.as_str().map(String::from))
}

/// Integer members of the object at `path`
pub fn int_map(value: &JsonValue, path: &str) -> BTreeMap<String, i64> {
    project(value, path, as_int)
}

/// Numeric members of the object at `path`
pub fn float_map(value: &JsonValue, path: &str) -> BTreeMap<String, f64> {
    project(value, path, JsonValue::as_f64)
}

/// Boolean members of the object at `path`
pub fn bool_map(value: &JsonValue, path: &str) -> BTreeMap<String, bool> {
    project(value, path, JsonValue::as_bool)
}

/// Convert every member of the object at `path` with `f`
pub fn object_map<T, F>(value: &JsonValue, path: &str, f: F) -> BTreeMap<String, T>
where
    F: Fn(&JsonValue) -> T,
{
    project(value, path, |v| Some(f(v)))
}

/// Turn a `[{"key": k, "value": v}]` tag list into a map.
///
/// Entries without a string key are skipped; a missing value maps to an
/// empty string.
pub fn tags_to_map(value: &JsonValue, path: &str) -> BTreeMap<String, String> {
    let Some(JsonValue::Array(tags)) = search(value, path) else {
        return BTreeMap::new();
    };

    tags.iter()
        .filter_map(|tag| {
            let key = tag.get("key")?.as_str()?;
            let value = match tag.get("value") {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Some((key.to_string(), value))
        })
        .collect()
}
