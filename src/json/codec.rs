//! Request/response body codec

use crate::error::Result;
use crate::types::JsonValue;
use serde::Serialize;
use std::io::Read;

/// Marshal a request body to JSON bytes.
///
/// `serde_json` never HTML-escapes `<`, `>` or `&`, so bodies go out as
/// written.
pub fn marshal_body<T: Serialize + ?Sized>(body: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}

/// Parse an in-memory response body.
///
/// Returns `None` for an empty or whitespace-only body.
pub fn parse_body(bytes: &[u8]) -> Result<Option<JsonValue>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(bytes)?))
}

/// Read and parse a response body from a reader
pub fn read_body<R: Read>(mut reader: R) -> Result<Option<JsonValue>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_body(&buf)
}

/// Drop `null` members from objects, recursively.
///
/// Request bodies are built from optional attributes; unset ones must not
/// be sent as explicit nulls.
pub fn remove_nil(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, remove_nil(v)))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(remove_nil)
                .collect(),
        ),
        other => other,
    }
}
