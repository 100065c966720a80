//! Query value types
//!
//! A tagged union replaces runtime type inspection: every value that can
//! appear in a query string is one of the [`QueryValue`] variants.

use crate::types::JsonValue;
use std::collections::{BTreeMap, HashMap};

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryValue {
    /// Absent value, never serialized
    #[default]
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StringList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    BoolList(Vec<bool>),
    /// Serialized as a single `{'k':'v', ...}` value
    StringMap(BTreeMap<String, String>),
}

impl QueryValue {
    /// Whether this value is the zero value of its type.
    ///
    /// Zero values are omitted from the serialized query string.
    pub fn is_zero(&self) -> bool {
        match self {
            QueryValue::Null => true,
            QueryValue::String(s) => s.is_empty(),
            QueryValue::Int(i) => *i == 0,
            QueryValue::Float(f) => *f == 0.0,
            QueryValue::Bool(b) => !*b,
            QueryValue::StringList(v) => v.is_empty(),
            QueryValue::IntList(v) => v.is_empty(),
            QueryValue::FloatList(v) => v.is_empty(),
            QueryValue::BoolList(v) => v.is_empty(),
            QueryValue::StringMap(m) => m.is_empty(),
        }
    }

    /// Render the value as the list of strings emitted under its key.
    ///
    /// Integer lists keep every element. Other lists drop zero elements.
    pub fn to_query_values(&self) -> Vec<String> {
        if self.is_zero() {
            return Vec::new();
        }

        match self {
            QueryValue::Null => Vec::new(),
            QueryValue::String(s) => vec![s.clone()],
            QueryValue::Int(i) => vec![i.to_string()],
            QueryValue::Float(f) => vec![format_float(*f)],
            QueryValue::Bool(b) => vec![b.to_string()],
            QueryValue::IntList(v) => v.iter().map(ToString::to_string).collect(),
            QueryValue::StringList(v) => v.iter().filter(|s| !s.is_empty()).cloned().collect(),
            QueryValue::FloatList(v) => v
                .iter()
                .filter(|f| **f != 0.0)
                .map(|f| format_float(*f))
                .collect(),
            QueryValue::BoolList(v) => v.iter().filter(|b| **b).map(ToString::to_string).collect(),
            QueryValue::StringMap(m) => vec![super::encode::format_string_map(m)],
        }
    }

    /// Build a query value from a dynamic JSON value.
    ///
    /// Homogeneous arrays map onto the matching list variant, mixed arrays
    /// fall back to a string list, objects become string maps.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => QueryValue::Null,
            JsonValue::Bool(b) => QueryValue::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => QueryValue::Int(i),
                None => QueryValue::Float(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => QueryValue::String(s.clone()),
            JsonValue::Array(items) => {
                if items.iter().all(|v| v.as_i64().is_some()) {
                    QueryValue::IntList(items.iter().filter_map(JsonValue::as_i64).collect())
                } else if items.iter().all(JsonValue::is_number) {
                    QueryValue::FloatList(items.iter().filter_map(JsonValue::as_f64).collect())
                } else if items.iter().all(JsonValue::is_boolean) {
                    QueryValue::BoolList(items.iter().filter_map(JsonValue::as_bool).collect())
                } else {
                    QueryValue::StringList(items.iter().map(json_scalar_to_string).collect())
                }
            }
            JsonValue::Object(map) => QueryValue::StringMap(
                map.iter()
                    .map(|(k, v)| (k.clone(), json_scalar_to_string(v)))
                    .collect(),
            ),
        }
    }
}

/// Render a float in shortest form, without a fraction for whole numbers
fn format_float(f: f64) -> String {
    format!("{f}")
}

fn json_scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$t> for QueryValue {
                fn from(v: $t) -> Self {
                    QueryValue::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => Int as i64,
    u64 => Int as i64,
    usize => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::String(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::String(v)
    }
}

impl From<&String> for QueryValue {
    fn from(v: &String) -> Self {
        QueryValue::String(v.clone())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(v: Vec<String>) -> Self {
        QueryValue::StringList(v)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(v: Vec<&str>) -> Self {
        QueryValue::StringList(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<i64>> for QueryValue {
    fn from(v: Vec<i64>) -> Self {
        QueryValue::IntList(v)
    }
}

impl From<Vec<i32>> for QueryValue {
    fn from(v: Vec<i32>) -> Self {
        QueryValue::IntList(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for QueryValue {
    fn from(v: Vec<f64>) -> Self {
        QueryValue::FloatList(v)
    }
}

impl From<Vec<bool>> for QueryValue {
    fn from(v: Vec<bool>) -> Self {
        QueryValue::BoolList(v)
    }
}

impl From<BTreeMap<String, String>> for QueryValue {
    fn from(v: BTreeMap<String, String>) -> Self {
        QueryValue::StringMap(v)
    }
}

impl From<HashMap<String, String>> for QueryValue {
    fn from(v: HashMap<String, String>) -> Self {
        QueryValue::StringMap(v.into_iter().collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(QueryValue::Null, Into::into)
    }
}

/// Ordered set of query parameters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    params: BTreeMap<String, QueryValue>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Whether a key is present (zero values included)
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.params.remove(key)
    }

    /// Number of parameters (zero values included)
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.params.iter()
    }

    /// Copy every entry of `other` into `self`, replacing existing keys
    pub fn extend(&mut self, other: QueryParams) {
        self.params.extend(other.params);
    }

    /// Fill in `defaults` for keys not set explicitly.
    ///
    /// Explicit keys always win, even when their value is a zero value.
    pub fn merge_defaults(&mut self, defaults: QueryParams) {
        for (key, value) in defaults.params {
            self.params.entry(key).or_insert(value);
        }
    }

    /// Build parameters from a JSON object, ignoring non-object input
    pub fn from_json(value: &JsonValue) -> Self {
        let mut params = Self::new();
        if let JsonValue::Object(map) = value {
            for (k, v) in map {
                params.insert(k.clone(), QueryValue::from_json(v));
            }
        }
        params
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
