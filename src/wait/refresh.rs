//! Refresh implementations

use super::state::{RefreshResult, StateRefresh, STATE_COMPLETED, STATE_PENDING};
use crate::client::ServiceClient;
use crate::error::{Error, Result};
use crate::httphelper::HttpHelper;
use crate::json::search_str;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::debug;

/// Polls a resource with GET and maps one status field onto wait states.
///
/// A status in `success` reports [`STATE_COMPLETED`], a status in `failure`
/// is reported as-is (ending the wait as unexpected), anything else is
/// [`STATE_PENDING`].
#[derive(Debug, Clone)]
pub struct StatusFieldRefresh<'a> {
    client: &'a ServiceClient,
    uri: String,
    path_params: Vec<(String, String)>,
    status_path: String,
    success: Vec<String>,
    failure: Vec<String>,
    missing_as: Option<String>,
}

impl<'a> StatusFieldRefresh<'a> {
    /// Create a refresh reading `status_path` from `uri`
    pub fn new(
        client: &'a ServiceClient,
        uri: impl Into<String>,
        status_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            uri: uri.into(),
            path_params: Vec::new(),
            status_path: status_path.into(),
            success: Vec::new(),
            failure: Vec::new(),
            missing_as: None,
        }
    }

    /// Set a `{placeholder}` value for the polled path
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((key.into(), value.into()));
        self
    }

    /// Statuses meaning success
    #[must_use]
    pub fn success<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.success = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Statuses meaning failure
    #[must_use]
    pub fn failure<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failure = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Report `state` instead of failing when the resource is not found
    #[must_use]
    pub fn missing_as(mut self, state: impl Into<String>) -> Self {
        self.missing_as = Some(state.into());
        self
    }

    fn map_status(&self, status: &str) -> String {
        if self.success.iter().any(|s| s == status) {
            STATE_COMPLETED.to_string()
        } else if self.failure.iter().any(|s| s == status) {
            status.to_string()
        } else {
            STATE_PENDING.to_string()
        }
    }
}

#[async_trait]
impl StateRefresh for StatusFieldRefresh<'_> {
    async fn refresh(&self) -> Result<RefreshResult> {
        let mut helper = HttpHelper::new(self.client).uri(self.uri.clone());
        for (k, v) in &self.path_params {
            helper = helper.path_param(k.clone(), v.clone());
        }

        let body = match helper.request().await.and_then(|r| r.value()) {
            Ok(body) => body,
            Err(e) if e.is_not_found() => match &self.missing_as {
                Some(state) => {
                    debug!("Resource at '{}' not found, reporting '{state}'", self.uri);
                    return Ok(RefreshResult::state(state.clone()));
                }
                None => return Err(e),
            },
            Err(e) => return Err(e),
        };

        let status = search_str(&body, &self.status_path).ok_or_else(|| {
            Error::json_path(format!(
                "error parsing {} from response body",
                self.status_path
            ))
        })?;
        debug!("Polled status '{status}' from '{}'", self.uri);

        Ok(RefreshResult::new(self.map_status(&status), body))
    }
}

/// Closure-backed refresh
pub struct FnRefresh<F>(F);

impl<F> FnRefresh<F>
where
    F: Fn() -> BoxFuture<'static, Result<RefreshResult>> + Send + Sync,
{
    /// Wrap a function returning a boxed refresh future
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> StateRefresh for FnRefresh<F>
where
    F: Fn() -> BoxFuture<'static, Result<RefreshResult>> + Send + Sync,
{
    async fn refresh(&self) -> Result<RefreshResult> {
        (self.0)().await
    }
}
