//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{LinkPager, MarkerPager, OffsetPager, PageSizePager};
use crate::error::Result;
use crate::json::count_items;
use crate::query::QueryParams;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use url::Url;

/// One fetched page: the parsed body and the URL that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Request URL of this page, including its query string
    pub url: Url,
    /// Parsed response body (`Null` for an empty body)
    pub body: JsonValue,
}

impl PageResult {
    /// Create a page from a URL and a parsed body
    pub fn new(url: Url, body: JsonValue) -> Self {
        Self { url, body }
    }

    /// Create a page from string parts, parsing both
    pub fn parse(url: &str, raw: &str) -> Result<Self> {
        let body = crate::json::parse_body(raw.as_bytes())?.unwrap_or(JsonValue::Null);
        Ok(Self {
            url: Url::parse(url)?,
            body,
        })
    }

    /// Value of a query parameter on this page's URL
    pub fn query_value(&self, key: &str) -> Option<String> {
        query_value(&self.url, key)
    }
}

/// Core trait for pagination strategies
///
/// A pager only decides; it never mutates the fetched page. Anything that
/// must carry over to the next request travels in the next URL.
pub trait Pager: Send + Sync {
    /// JSON path of the item array used for the emptiness check
    fn data_path(&self) -> &str;

    /// Query parameters injected into the first request.
    ///
    /// Keys the caller sets explicitly take precedence.
    fn default_query(&self) -> QueryParams {
        QueryParams::new()
    }

    /// Whether the page carries no items, which ends pagination
    fn is_empty(&self, page: &PageResult) -> Result<bool> {
        Ok(count_items(&page.body, self.data_path()) == 0)
    }

    /// URL of the following page, `None` when there is none
    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>>;
}

/// Serializable pager selection, used by configuration files and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PagerConfig {
    /// Offset/limit pagination
    Offset {
        data_path: String,
        #[serde(default = "default_offset_key")]
        offset_key: String,
        #[serde(default = "default_limit_key")]
        limit_key: String,
        #[serde(default)]
        default_limit: u64,
    },

    /// Marker/cursor pagination
    Marker {
        data_path: String,
        next_exp: String,
        #[serde(default = "default_marker_key")]
        marker_key: String,
    },

    /// Next link in the response body
    Link { data_path: String, link_exp: String },

    /// Page number pagination
    PageSize {
        data_path: String,
        #[serde(default = "default_page_num_key")]
        page_num_key: String,
        #[serde(default)]
        per_page_key: String,
        #[serde(default)]
        per_page: u64,
    },
}

fn default_offset_key() -> String {
    "offset".to_string()
}

fn default_limit_key() -> String {
    "limit".to_string()
}

fn default_marker_key() -> String {
    "marker".to_string()
}

fn default_page_num_key() -> String {
    "page".to_string()
}

impl PagerConfig {
    /// Create offset pagination config
    pub fn offset(
        data_path: impl Into<String>,
        offset_key: impl Into<String>,
        limit_key: impl Into<String>,
        default_limit: u64,
    ) -> Self {
        Self::Offset {
            data_path: data_path.into(),
            offset_key: offset_key.into(),
            limit_key: limit_key.into(),
            default_limit,
        }
    }

    /// Create marker pagination config
    pub fn marker(
        data_path: impl Into<String>,
        next_exp: impl Into<String>,
        marker_key: impl Into<String>,
    ) -> Self {
        Self::Marker {
            data_path: data_path.into(),
            next_exp: next_exp.into(),
            marker_key: marker_key.into(),
        }
    }

    /// Create link pagination config
    pub fn link(data_path: impl Into<String>, link_exp: impl Into<String>) -> Self {
        Self::Link {
            data_path: data_path.into(),
            link_exp: link_exp.into(),
        }
    }

    /// Create page number pagination config
    pub fn page_size(
        data_path: impl Into<String>,
        page_num_key: impl Into<String>,
        per_page_key: impl Into<String>,
        per_page: u64,
    ) -> Self {
        Self::PageSize {
            data_path: data_path.into(),
            page_num_key: page_num_key.into(),
            per_page_key: per_page_key.into(),
            per_page,
        }
    }

    /// Build the pager this config describes
    pub fn build(&self) -> Box<dyn Pager> {
        match self.clone() {
            Self::Offset {
                data_path,
                offset_key,
                limit_key,
                default_limit,
            } => Box::new(OffsetPager::new(data_path, offset_key, limit_key, default_limit)),
            Self::Marker {
                data_path,
                next_exp,
                marker_key,
            } => Box::new(MarkerPager::new(data_path, next_exp, marker_key)),
            Self::Link {
                data_path,
                link_exp,
            } => Box::new(LinkPager::new(data_path, link_exp)),
            Self::PageSize {
                data_path,
                page_num_key,
                per_page_key,
                per_page,
            } => Box::new(PageSizePager::new(
                data_path,
                page_num_key,
                per_page_key,
                per_page,
            )),
        }
    }
}

/// Read a query parameter from a URL
pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Return a copy of `url` with `key` set to `value`.
///
/// Other parameters keep their order; every previous occurrence of `key`
/// is replaced by a single pair at the end.
pub fn with_query_value(url: &Url, key: &str, value: &str) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut next = url.clone();
    {
        let mut serializer = next.query_pairs_mut();
        serializer.clear();
        for (k, v) in &pairs {
            serializer.append_pair(k, v);
        }
        serializer.append_pair(key, value);
    }
    next
}
