//! Deep merge used to aggregate paginated bodies

use crate::types::JsonValue;

/// Merge `next` into `base`.
///
/// Objects merge key by key, arrays are concatenated (base first) and any
/// other pairing takes the value from `next`.
pub fn merge_values(base: JsonValue, next: JsonValue) -> JsonValue {
    match (base, next) {
        (JsonValue::Object(mut left), JsonValue::Object(right)) => {
            for (key, value) in right {
                let merged = match left.remove(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => value,
                };
                left.insert(key, merged);
            }
            JsonValue::Object(left)
        }
        (JsonValue::Array(mut left), JsonValue::Array(right)) => {
            left.extend(right);
            JsonValue::Array(left)
        }
        (_, next) => next,
    }
}
