//! Lazily typed view over a JSON value

use super::path::search;
use crate::error::Result;
use crate::types::JsonValue;
use serde::de::DeserializeOwned;

/// A JSON value read from an API response, with typed accessors.
///
/// Accessors never fail: a missing value or a value of the wrong type
/// yields the supplied default, mirroring how response fields are mapped
/// onto optional attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonResult {
    value: Option<JsonValue>,
    raw: String,
}

impl JsonResult {
    /// Parse a raw JSON document, keeping the original text
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let value = serde_json::from_str(&raw)?;
        Ok(Self {
            value: Some(value),
            raw,
        })
    }

    /// Wrap an already-parsed value
    pub fn from_value(value: JsonValue) -> Self {
        let raw = value.to_string();
        Self {
            value: Some(value),
            raw,
        }
    }

    /// A result for a path that did not resolve
    pub fn missing() -> Self {
        Self::default()
    }

    /// Look up a nested path
    pub fn get(&self, path: &str) -> JsonResult {
        self.value
            .as_ref()
            .and_then(|v| search(v, path))
            .map_or_else(Self::missing, Self::from_value)
    }

    /// Whether the value exists (a JSON `null` counts as missing)
    pub fn exists(&self) -> bool {
        !matches!(self.value, None | Some(JsonValue::Null))
    }

    /// Raw JSON text of this value
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Borrow the underlying value
    pub fn value(&self) -> Option<&JsonValue> {
        self.value.as_ref()
    }

    /// Take the underlying value, `Null` when missing
    pub fn into_value(self) -> JsonValue {
        self.value.unwrap_or(JsonValue::Null)
    }

    /// Borrow the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(JsonValue::as_str)
    }

    /// String form of the value, `default` when missing.
    ///
    /// Numbers and booleans are rendered, containers come back as raw JSON.
    pub fn string_or(&self, default: &str) -> String {
        match &self.value {
            Some(JsonValue::String(s)) => s.clone(),
            None | Some(JsonValue::Null) => default.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Integer value, parsing numeric strings and truncating floats
    pub fn i64_or(&self, default: i64) -> i64 {
        match &self.value {
            Some(JsonValue::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(JsonValue::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Float value, parsing numeric strings
    pub fn f64_or(&self, default: f64) -> f64 {
        match &self.value {
            Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(default),
            Some(JsonValue::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Boolean value, accepting `"true"`/`"false"` strings
    pub fn bool_or(&self, default: bool) -> bool {
        match &self.value {
            Some(JsonValue::Bool(b)) => *b,
            Some(JsonValue::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Elements of an array value.
    ///
    /// A missing value gives an empty list, a scalar or object gives a
    /// single-element list.
    pub fn array(&self) -> Vec<JsonResult> {
        match &self.value {
            Some(JsonValue::Array(items)) => items.iter().cloned().map(Self::from_value).collect(),
            None | Some(JsonValue::Null) => Vec::new(),
            Some(other) => vec![Self::from_value(other.clone())],
        }
    }

    /// Deserialize into a concrete type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.value.clone().unwrap_or(JsonValue::Null);
        Ok(serde_json::from_value(value)?)
    }
}
