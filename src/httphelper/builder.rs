//! Request builder and pagination loop

use super::response::HttpResponse;
use crate::client::{RequestOptions, ServiceClient};
use crate::error::Result;
use crate::filter::JsonFilter;
use crate::json::{marshal_body, merge_values, parse_body};
use crate::pagination::{
    CustomPager, LinkPager, MarkerPager, OffsetPager, PageResult, PageSizePager, Pager,
    PagerConfig,
};
use crate::query::{append_to_url, QueryParams, QueryValue};
use crate::template::{render_path, PathContext};
use crate::types::{JsonValue, Method};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};
use url::Url;

/// Builder for one logical API call.
///
/// Consumed by [`HttpHelper::request`], so a used builder cannot be issued
/// twice.
pub struct HttpHelper<'a> {
    client: &'a ServiceClient,
    method: Method,
    uri: String,
    body: Option<JsonValue>,
    query: QueryParams,
    path_params: BTreeMap<String, String>,
    headers: HashMap<String, String>,
    ok_codes: Option<Vec<u16>>,
    pager: Option<Box<dyn Pager>>,
    filters: Vec<JsonFilter>,
}

impl<'a> HttpHelper<'a> {
    /// Create a GET request against the client's endpoint
    pub fn new(client: &'a ServiceClient) -> Self {
        Self {
            client,
            method: Method::GET,
            uri: String::new(),
            body: None,
            query: QueryParams::new(),
            path_params: BTreeMap::new(),
            headers: HashMap::new(),
            ok_codes: None,
            pager: None,
            filters: Vec::new(),
        }
    }

    // ========================================================================
    // Request Shape
    // ========================================================================

    /// Set the request path (relative to the endpoint) or an absolute URL
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Merge query parameters; later values win
    #[must_use]
    pub fn query(mut self, params: QueryParams) -> Self {
        self.query.extend(params);
        self
    }

    /// Set one query parameter
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Set a `{placeholder}` value for the path
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key.into(), value.into());
        self
    }

    /// Merge request headers; later values win
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in headers {
            self.headers.insert(k.into(), v.into());
        }
        self
    }

    /// Set one request header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Accept only this status code
    #[must_use]
    pub fn ok_code(self, code: u16) -> Self {
        self.ok_codes([code])
    }

    /// Accept only these status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.ok_codes = Some(codes.into_iter().collect());
        self
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Use marker pagination
    #[must_use]
    pub fn marker_pager(
        self,
        data_path: impl Into<String>,
        next_exp: impl Into<String>,
        marker_key: impl Into<String>,
    ) -> Self {
        self.pager(MarkerPager::new(data_path, next_exp, marker_key))
    }

    /// Use offset pagination
    #[must_use]
    pub fn offset_pager(
        self,
        data_path: impl Into<String>,
        offset_key: impl Into<String>,
        limit_key: impl Into<String>,
        default_limit: u64,
    ) -> Self {
        self.pager(OffsetPager::new(
            data_path,
            offset_key,
            limit_key,
            default_limit,
        ))
    }

    /// Follow a next link found in the body
    #[must_use]
    pub fn link_pager(self, data_path: impl Into<String>, link_exp: impl Into<String>) -> Self {
        self.pager(LinkPager::new(data_path, link_exp))
    }

    /// Use page number pagination
    #[must_use]
    pub fn page_size_pager(
        self,
        data_path: impl Into<String>,
        page_num_key: impl Into<String>,
        per_page_key: impl Into<String>,
        per_page: u64,
    ) -> Self {
        self.pager(PageSizePager::new(
            data_path,
            page_num_key,
            per_page_key,
            per_page,
        ))
    }

    /// Compute each next URL with a function
    #[must_use]
    pub fn custom_pager<F>(self, data_path: impl Into<String>, next: F) -> Self
    where
        F: Fn(&JsonValue, &Url) -> Option<String> + Send + Sync + 'static,
    {
        self.pager(CustomPager::new(data_path, next))
    }

    /// Use a pager built from configuration
    #[must_use]
    pub fn pager_config(mut self, config: &PagerConfig) -> Self {
        self.pager = Some(config.build());
        self
    }

    /// Use any pager. Replaces a previously set pager.
    #[must_use]
    pub fn pager(mut self, pager: impl Pager + 'static) -> Self {
        self.pager = Some(Box::new(pager));
        self
    }

    /// Filter the aggregated body; filters run in order
    #[must_use]
    pub fn filter(mut self, filter: JsonFilter) -> Self {
        self.filters.push(filter);
        self
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Full URL of the first request
    pub fn build_url(&self) -> Result<String> {
        let mut ctx = PathContext::with_project(self.client.project_id());
        ctx.extend(self.path_params.clone());

        let path = render_path(&self.uri, &ctx)?;
        let url = self.client.resource_url(&path);

        let mut params = self.query.clone();
        if let Some(pager) = &self.pager {
            params.merge_defaults(pager.default_query());
        }

        Ok(append_to_url(&url, &params))
    }

    /// Issue the request, walking every page when a pager is set
    pub async fn request(self) -> Result<HttpResponse> {
        let url = self.build_url()?;
        let options = RequestOptions {
            body: self.body.as_ref().map(marshal_body).transpose()?,
            headers: self.headers.clone(),
            ok_codes: self.ok_codes.clone(),
        };

        let response = match &self.pager {
            None => self.request_once(url, options).await?,
            Some(pager) => self.request_pages(pager.as_ref(), url, options).await?,
        };

        self.apply_filters(response)
    }

    async fn request_once(&self, url: String, options: RequestOptions) -> Result<HttpResponse> {
        let raw = self.client.request(self.method, &url, options).await?;
        Ok(HttpResponse::new(url, raw.status, raw.body, 1))
    }

    async fn request_pages(
        &self,
        pager: &dyn Pager,
        first_url: String,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let mut url = first_url.clone();
        let mut merged: Option<JsonValue> = None;
        let mut pages = 0;
        let mut status;

        loop {
            let raw = self
                .client
                .request(self.method, &url, options.clone())
                .await?;
            pages += 1;
            status = raw.status;

            let page = PageResult::parse(&url, &raw.body)?;
            let empty = pager.is_empty(&page)?;
            let next = if empty {
                None
            } else {
                pager.next_page_url(&page)?
            };
            debug!("Fetched page {pages} from {url} (empty: {empty})");

            // An empty body adds nothing to the aggregate
            if !page.body.is_null() {
                merged = Some(match merged {
                    None => page.body,
                    Some(acc) => merge_values(acc, page.body),
                });
            }

            match next {
                Some(next) if next == url => {
                    warn!("Next page URL repeats the current one, stopping pagination at {url}");
                    break;
                }
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }

        let raw = match merged {
            Some(JsonValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        };
        Ok(HttpResponse::new(first_url, status, raw, pages))
    }

    fn apply_filters(&self, response: HttpResponse) -> Result<HttpResponse> {
        if self.filters.is_empty() || response.is_empty() {
            return Ok(response);
        }

        let Some(mut value) = parse_body(response.raw().as_bytes())? else {
            return Ok(response);
        };
        for filter in &self.filters {
            value = filter.apply(value)?;
        }

        Ok(HttpResponse::new(
            response.url().to_string(),
            response.status(),
            value.to_string(),
            response.pages(),
        ))
    }
}

impl std::fmt::Debug for HttpHelper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHelper")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("query", &self.query)
            .field("has_pager", &self.pager.is_some())
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}
