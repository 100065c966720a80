//! Aggregated response of a request

use crate::error::{Error, Result};
use crate::json::JsonResult;
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;

/// Body of a completed request, parsed on access
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    url: String,
    status: u16,
    raw: String,
    pages: usize,
}

impl HttpResponse {
    pub(crate) fn new(url: String, status: u16, raw: String, pages: usize) -> Self {
        Self {
            url,
            status,
            raw,
            pages,
        }
    }

    /// URL of the first request
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Status code of the last response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text.
    ///
    /// For a single call this is the response body exactly as received;
    /// for paginated or filtered calls it is the serialized aggregate.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of pages fetched
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Body as a JSON tree.
    ///
    /// Fails with [`Error::NotFound`] when the body is empty.
    pub fn result(&self) -> Result<JsonResult> {
        if self.is_empty() {
            return Err(Error::not_found(format!(
                "empty response body from {}",
                self.url
            )));
        }
        JsonResult::parse(self.raw.clone())
    }

    /// Body decoded as a JSON object
    pub fn data(&self) -> Result<JsonObject> {
        self.decode()
    }

    /// Body as an untyped value
    pub fn value(&self) -> Result<JsonValue> {
        Ok(self.result()?.into_value())
    }

    /// Body decoded into a caller type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::not_found(format!(
                "empty response body from {}",
                self.url
            )));
        }
        Ok(serde_json::from_str(&self.raw)?)
    }
}
