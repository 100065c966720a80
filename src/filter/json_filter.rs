//! Condition-based filtering of a JSON array

use super::types::{Condition, Operator, Predicate};
use crate::error::{Error, Result};
use crate::json::search;
use crate::types::JsonValue;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Filter over the array found at a path of a JSON document
#[derive(Clone, Default)]
pub struct JsonFilter {
    data: Option<JsonValue>,
    from: String,
    conditions: Vec<Condition>,
    predicates: Vec<Predicate>,
}

impl JsonFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document to filter
    #[must_use]
    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the dotted path of the array to filter.
    ///
    /// An empty path filters the document itself, which must then be an
    /// array.
    #[must_use]
    pub fn from(mut self, path: impl Into<String>) -> Self {
        self.from = path.into();
        self
    }

    /// Add a condition on a field of each element.
    ///
    /// A `null` expected value adds nothing.
    #[must_use]
    pub fn where_(
        mut self,
        key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Self {
        let value = value.into();
        if value.is_null() {
            return self;
        }
        self.conditions.push(Condition {
            key: key.into(),
            operator: operator.into(),
            value,
        });
        self
    }

    /// Add a caller-defined predicate on each element
    #[must_use]
    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&JsonValue) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(f));
        self
    }

    /// Path of the filtered array
    pub fn get_from(&self) -> &str {
        &self.from
    }

    /// Registered conditions, in order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Run the filter over the document set with [`JsonFilter::data`]
    pub fn get(&self) -> Result<JsonValue> {
        let data = self
            .data
            .clone()
            .ok_or_else(|| Error::filter("no data to filter"))?;
        self.apply(data)
    }

    /// Run the filter over a document, returning it with the array replaced
    /// by the matching elements
    pub fn apply(&self, mut value: JsonValue) -> Result<JsonValue> {
        let conditions = self
            .conditions
            .iter()
            .map(|c| Ok((c, c.operator.parse::<Operator>()?)))
            .collect::<Result<Vec<_>>>()?;

        let target = if self.from.is_empty() {
            if !value.is_array() {
                return Err(Error::filter(
                    "no array path set and the document is not an array",
                ));
            }
            Some(&mut value)
        } else {
            value.pointer_mut(&to_pointer(&self.from))
        };

        let Some(target) = target else {
            debug!("Filter path '{}' not found, leaving data unchanged", self.from);
            return Ok(value);
        };

        let JsonValue::Array(items) = target else {
            return Err(Error::filter(format!(
                "value at '{}' is not an array",
                self.from
            )));
        };

        let before = items.len();
        items.retain(|item| {
            conditions.iter().all(|(cond, op)| {
                evaluate(*op, search(item, &cond.key).as_ref(), &cond.value)
            }) && self.predicates.iter().all(|p| p(item))
        });
        debug!("Filter on '{}' kept {} of {before} items", self.from, items.len());

        Ok(value)
    }
}

impl std::fmt::Debug for JsonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFilter")
            .field("from", &self.from)
            .field("conditions", &self.conditions)
            .field("predicates", &self.predicates.len())
            .finish_non_exhaustive()
    }
}

/// Convert a dotted path into a JSON pointer
fn to_pointer(path: &str) -> String {
    path.split('.')
        .filter(|p| !p.is_empty())
        .map(|p| format!("/{}", p.replace('~', "~0").replace('/', "~1")))
        .collect()
}

/// Evaluate one operator against an element's field
fn evaluate(op: Operator, actual: Option<&JsonValue>, expected: &JsonValue) -> bool {
    if expected.is_null() {
        return true;
    }

    match op {
        Operator::Eq => actual.is_some_and(|a| values_equal(a, expected)),
        Operator::Ne => !actual.is_some_and(|a| values_equal(a, expected)),
        Operator::Gt => compare(actual, expected) == Some(Ordering::Greater),
        Operator::Ge => matches!(
            compare(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lt => compare(actual, expected) == Some(Ordering::Less),
        Operator::Le => matches!(
            compare(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Has => has(actual, expected, true),
        Operator::HasContains => has(actual, expected, false),
    }
}

/// Membership test shared by `has` and `hasContains`.
///
/// `has` needs every key of an expected map and one exactly equal list item.
/// `hasContains` needs any key, and list strings match by substring.
fn has(actual: Option<&JsonValue>, expected: &JsonValue, all: bool) -> bool {
    match expected {
        JsonValue::Object(wanted) => {
            if wanted.is_empty() {
                return true;
            }
            let Some(JsonValue::Object(map)) = actual else {
                return false;
            };
            let hit = |(k, v): (&String, &JsonValue)| {
                map.get(k).is_some_and(|a| values_equal(a, v))
            };
            if all {
                wanted.iter().all(hit)
            } else {
                wanted.iter().any(hit)
            }
        }
        JsonValue::Array(wanted) => {
            if wanted.is_empty() {
                return true;
            }
            let Some(JsonValue::Array(items)) = actual else {
                return false;
            };
            if all {
                wanted.iter().any(|w| items.iter().any(|a| values_equal(a, w)))
            } else {
                wanted.iter().any(|w| items.iter().any(|a| item_contains(a, w)))
            }
        }
        scalar => match actual {
            Some(JsonValue::Array(items)) => {
                if all {
                    items.iter().any(|a| values_equal(a, scalar))
                } else {
                    items.iter().any(|a| item_contains(a, scalar))
                }
            }
            _ => false,
        },
    }
}

/// Equality with numbers compared as `f64`
fn values_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Equality, or substring match for strings
fn item_contains(actual: &JsonValue, wanted: &JsonValue) -> bool {
    match (actual, wanted) {
        (JsonValue::String(a), JsonValue::String(w)) => a.contains(w.as_str()),
        _ => values_equal(actual, wanted),
    }
}

/// Order two values of the same kind; mixed kinds do not compare
fn compare(actual: Option<&JsonValue>, expected: &JsonValue) -> Option<Ordering> {
    let actual = actual?;
    match (actual, expected) {
        (JsonValue::Number(_), JsonValue::Number(_)) => {
            actual.as_f64()?.partial_cmp(&expected.as_f64()?)
        }
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
