//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{query_value, with_query_value, PageResult, Pager};
use crate::error::Result;
use crate::json::{count_items, search_str};
use crate::query::QueryParams;
use crate::types::JsonValue;
use tracing::{debug, warn};
use url::{form_urlencoded, Url};

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Reads `offset` and `limit` from the current page URL and requests
/// `offset + limit` next.
/// Common patterns:
/// - `?offset=0&limit=100`
/// - `?start=20&limit=10`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPager {
    /// JSON path of the item array
    pub data_path: String,
    /// Query parameter name for offset
    pub offset_key: String,
    /// Query parameter name for limit
    pub limit_key: String,
    /// Page size used when the request does not set one (0 = infer)
    pub default_limit: u64,
}

impl OffsetPager {
    /// Create a new offset pager
    pub fn new(
        data_path: impl Into<String>,
        offset_key: impl Into<String>,
        limit_key: impl Into<String>,
        default_limit: u64,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            offset_key: offset_key.into(),
            limit_key: limit_key.into(),
            default_limit,
        }
    }

    /// Resolve the page size for the current page.
    ///
    /// Falls back to the configured default, then to the number of items
    /// on the page.
    fn resolve_limit(&self, page: &PageResult) -> u64 {
        if let Some(limit) = page
            .query_value(&self.limit_key)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|l| *l > 0)
        {
            return limit;
        }

        if self.default_limit > 0 {
            return self.default_limit;
        }

        let inferred = count_items(&page.body, &self.data_path) as u64;
        warn!(
            "No '{}' set and no default page size configured, inferring {inferred} from the first page",
            self.limit_key
        );
        inferred
    }
}

impl Pager for OffsetPager {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn default_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if self.default_limit > 0 && !self.limit_key.is_empty() {
            params.insert(self.limit_key.clone(), self.default_limit);
        }
        params
    }

    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>> {
        let offset = page
            .query_value(&self.offset_key)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let limit = self.resolve_limit(page);
        if limit == 0 {
            return Ok(None);
        }

        let Some(next_offset) = offset.checked_add(limit) else {
            warn!("Offset {offset} + limit {limit} overflows, stopping pagination");
            return Ok(None);
        };

        let next = with_query_value(&page.url, &self.limit_key, &limit.to_string());
        let next = with_query_value(&next, &self.offset_key, &next_offset.to_string());
        Ok(Some(next.to_string()))
    }
}

// ============================================================================
// Marker Pagination
// ============================================================================

/// Marker/cursor pagination
///
/// Extracts the next marker from the response body and echoes it back in
/// the next request.
/// Common patterns:
/// - `{"page_info": {"next_marker": "abc"}}` → `?marker=abc`
/// - `{"links": {"next": "/v1/items?marker=abc"}}` → `?marker=abc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPager {
    /// JSON path of the item array
    pub data_path: String,
    /// JSON path of the next reference (a marker or a URL)
    pub next_exp: String,
    /// Query parameter name for the marker
    pub marker_key: String,
}

impl MarkerPager {
    /// Create a new marker pager
    pub fn new(
        data_path: impl Into<String>,
        next_exp: impl Into<String>,
        marker_key: impl Into<String>,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            next_exp: next_exp.into(),
            marker_key: marker_key.into(),
        }
    }

    /// Marker for the following page.
    ///
    /// A reference with a query string yields its marker parameter, any
    /// other reference is the marker itself.
    pub fn last_marker(&self, page: &PageResult) -> Option<String> {
        let reference = search_str(&page.body, &self.next_exp)?;
        if reference.is_empty() {
            return None;
        }

        match reference.split_once('?') {
            Some((_, query)) => form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == self.marker_key.as_str())
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty()),
            None => Some(reference),
        }
    }
}

impl Pager for MarkerPager {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>> {
        let Some(marker) = self.last_marker(page) else {
            return Ok(None);
        };
        let next = with_query_value(&page.url, &self.marker_key, &marker);
        Ok(Some(next.to_string()))
    }
}

// ============================================================================
// Link Pagination
// ============================================================================

/// Next link in the response body
///
/// Evaluates a path expression against the whole body and follows the URL
/// it yields. Relative links resolve against the current page URL.
/// Common patterns:
/// - `{"links": {"next": "https://..."}}` with `links.next`
/// - `{"links": [{"rel": "next", "href": "..."}]}` with
///   `$.links[?(@.rel == 'next')].href`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPager {
    /// JSON path of the item array
    pub data_path: String,
    /// Path expression yielding the next URL
    pub link_exp: String,
}

impl LinkPager {
    /// Create a new link pager
    pub fn new(data_path: impl Into<String>, link_exp: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            link_exp: link_exp.into(),
        }
    }
}

impl Pager for LinkPager {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>> {
        let Some(link) = search_str(&page.body, &self.link_exp).filter(|l| !l.is_empty()) else {
            return Ok(None);
        };

        match page.url.join(&link) {
            Ok(next) => Ok(Some(next.to_string())),
            Err(e) => {
                debug!("Ignoring unparsable next link '{link}': {e}");
                Ok(None)
            }
        }
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Increments a page number parameter; the first page is 1 when the
/// request does not carry one. Only the emptiness check ends pagination.
/// Common patterns:
/// - `?page=2`
/// - `?page_num=2&page_size=50`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizePager {
    /// JSON path of the item array
    pub data_path: String,
    /// Query parameter name for the page number
    pub page_num_key: String,
    /// Optional query parameter name for the page size
    pub per_page_key: String,
    /// Page size value (0 = let the server decide)
    pub per_page: u64,
}

impl PageSizePager {
    /// Create a new page number pager
    pub fn new(
        data_path: impl Into<String>,
        page_num_key: impl Into<String>,
        per_page_key: impl Into<String>,
        per_page: u64,
    ) -> Self {
        Self {
            data_path: data_path.into(),
            page_num_key: page_num_key.into(),
            per_page_key: per_page_key.into(),
            per_page,
        }
    }
}

impl Pager for PageSizePager {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn default_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if self.per_page > 0 && !self.per_page_key.is_empty() {
            params.insert(self.per_page_key.clone(), self.per_page);
        }
        params
    }

    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>> {
        let current = page
            .query_value(&self.page_num_key)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1);

        let next = with_query_value(&page.url, &self.page_num_key, &(current + 1).to_string());
        Ok(Some(next.to_string()))
    }
}

// ============================================================================
// Custom Pagination
// ============================================================================

/// Function computing the next URL from a page body and its URL
pub type NextUrlFn = dyn Fn(&JsonValue, &Url) -> Option<String> + Send + Sync;

/// Caller-supplied pagination
///
/// For APIs whose pagination fits none of the built-in shapes. Returning
/// `None` from the function ends pagination.
pub struct CustomPager {
    /// JSON path of the item array
    pub data_path: String,
    next: Box<NextUrlFn>,
}

impl CustomPager {
    /// Create a new custom pager
    pub fn new<F>(data_path: impl Into<String>, next: F) -> Self
    where
        F: Fn(&JsonValue, &Url) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            data_path: data_path.into(),
            next: Box::new(next),
        }
    }
}

impl std::fmt::Debug for CustomPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPager")
            .field("data_path", &self.data_path)
            .finish_non_exhaustive()
    }
}

impl Pager for CustomPager {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn next_page_url(&self, page: &PageResult) -> Result<Option<String>> {
        Ok((self.next)(&page.body, &page.url).filter(|u| !u.is_empty()))
    }
}

/// Current value of a numeric query parameter, for custom pagers
pub fn query_number(url: &Url, key: &str) -> Option<u64> {
    query_value(url, key).and_then(|v| v.parse().ok())
}
