//! Dotted path search over a JSON tree

use crate::types::JsonValue;
use tracing::debug;

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(i64),
    Wildcard,
}

/// Search a JSON tree and return a copy of the value at `path`.
///
/// An empty path (or `$`) returns the whole tree. Returns `None` when any
/// step is missing. Projections (`[*]`) return an array of the matches.
pub fn search(value: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.trim();
    if path.is_empty() || path == "$" || path == "@" {
        return Some(value.clone());
    }

    if is_full_jsonpath(path) {
        return search_jsonpath(value, path);
    }

    let path = path
        .strip_prefix("$.")
        .or_else(|| path.strip_prefix("@."))
        .unwrap_or(path);
    let segments = parse_segments(path)?;
    walk(value, &segments)
}

/// Search and render the value as a string.
///
/// Strings come back verbatim, numbers and booleans in their JSON form.
/// Null, missing, and container values yield `None`.
pub fn search_str(value: &JsonValue, path: &str) -> Option<String> {
    match search(value, path)? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Count the items at `path`.
///
/// Arrays count their elements, missing or null values count as zero and
/// any other value counts as a single item.
pub fn count_items(value: &JsonValue, path: &str) -> usize {
    match search(value, path) {
        Some(JsonValue::Array(items)) => items.len(),
        Some(JsonValue::Null) | None => 0,
        Some(_) => 1,
    }
}

fn is_full_jsonpath(path: &str) -> bool {
    path.starts_with('$') && (path.contains("..") || path.contains("?(") || path.contains("['"))
}

fn search_jsonpath(value: &JsonValue, path: &str) -> Option<JsonValue> {
    use jsonpath_rust::JsonPath;

    let jp = match JsonPath::try_from(path) {
        Ok(jp) => jp,
        Err(e) => {
            debug!("Invalid JSONPath '{path}': {e}");
            return None;
        }
    };

    match jp.find(value) {
        JsonValue::Array(mut found) => match found.len() {
            0 => None,
            1 => found.pop(),
            _ => Some(JsonValue::Array(found)),
        },
        JsonValue::Null => None,
        other => Some(other),
    }
}

fn parse_segments(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        if part.is_empty() {
            return None;
        }

        let (name, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if name == "*" {
            segments.push(Segment::Wildcard);
        } else if !name.is_empty() {
            segments.push(Segment::Key(name.to_string()));
        }

        while let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']')?;
            let inner = &stripped[..end];
            if inner == "*" {
                segments.push(Segment::Wildcard);
            } else {
                segments.push(Segment::Index(inner.parse().ok()?));
            }
            rest = &stripped[end + 1..];
        }
    }

    Some(segments)
}

fn walk(current: &JsonValue, segments: &[Segment]) -> Option<JsonValue> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(current.clone());
    };

    match first {
        Segment::Key(key) => match current {
            JsonValue::Object(map) => walk(map.get(key)?, rest),
            JsonValue::Array(items) => {
                let index: usize = key.parse().ok()?;
                walk(items.get(index)?, rest)
            }
            _ => None,
        },
        Segment::Index(index) => {
            let JsonValue::Array(items) = current else {
                return None;
            };
            #[allow(clippy::cast_possible_wrap)]
            let idx = if *index < 0 {
                items.len() as i64 + index
            } else {
                *index
            };
            if idx < 0 {
                return None;
            }
            walk(items.get(idx as usize)?, rest)
        }
        Segment::Wildcard => {
            let children: Vec<&JsonValue> = match current {
                JsonValue::Array(items) => items.iter().collect(),
                JsonValue::Object(map) => map.values().collect(),
                _ => return None,
            };
            Some(JsonValue::Array(
                children
                    .into_iter()
                    .filter_map(|child| walk(child, rest))
                    .collect(),
            ))
        }
    }
}
