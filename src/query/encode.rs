//! Query string encoding

use super::types::QueryParams;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Serialize parameters into a form-urlencoded query string.
///
/// The result has no leading `?`. Keys come out in alphabetical order and
/// a key whose value renders to nothing is left out entirely.
pub fn encode(params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter() {
        for v in value.to_query_values() {
            serializer.append_pair(key, &v);
        }
    }
    serializer.finish()
}

/// Append encoded parameters to a URL, respecting an existing `?`
pub fn append_to_url(url: &str, params: &QueryParams) -> String {
    let query = encode(params);
    if query.is_empty() {
        return url.to_string();
    }

    if url.contains('?') {
        if url.ends_with('?') || url.ends_with('&') {
            format!("{url}{query}")
        } else {
            format!("{url}&{query}")
        }
    } else {
        format!("{url}?{query}")
    }
}

/// Render a string map as `{'k1':'v1', 'k2':'v2'}`
pub fn format_string_map(map: &BTreeMap<String, String>) -> String {
    let entries: Vec<String> = map.iter().map(|(k, v)| format!("'{k}':'{v}'")).collect();
    format!("{{{}}}", entries.join(", "))
}
