//! Service client bound to an endpoint and project
//!
//! Handles:
//! - Endpoint and project id used to render request paths
//! - Default and per-request headers, including the auth token
//! - Accepted status code checks

use crate::error::{Error, Result};
use crate::types::Method;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Header carrying a pre-issued token
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Configuration for a service client
#[derive(Debug, Clone)]
pub struct ServiceClientConfig {
    /// Service endpoint, e.g. `https://cce.ap-southeast-1.myhuaweicloud.com/`
    pub endpoint: String,
    /// Project id substituted for `{project_id}`
    pub project_id: String,
    /// Region name, informational
    pub region: Option<String>,
    /// Token sent as `X-Auth-Token`
    pub auth_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Accept invalid TLS certificates
    pub insecure: bool,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ServiceClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            project_id: String::new(),
            region: None,
            auth_token: None,
            timeout: Duration::from_secs(60),
            insecure: false,
            default_headers: HashMap::new(),
            user_agent: format!("tf-httphelper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceClientConfig {
    /// Create a new config builder
    pub fn builder() -> ServiceClientConfigBuilder {
        ServiceClientConfigBuilder::default()
    }
}

/// Builder for service client config
#[derive(Default)]
pub struct ServiceClientConfigBuilder {
    config: ServiceClientConfig,
}

impl ServiceClientConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the project id
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.config.project_id = project_id.into();
        self
    }

    /// Set the region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    /// Set the auth token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config.insecure = insecure;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ServiceClientConfig {
        self.config
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Encoded JSON body
    pub body: Option<Vec<u8>>,
    /// Request headers, applied after the default headers
    pub headers: HashMap<String, String>,
    /// Accepted status codes; any 2xx when unset
    pub ok_codes: Option<Vec<u16>>,
}

/// A response whose status code was accepted
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

/// Client for one cloud service endpoint
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    config: ServiceClientConfig,
}

impl ServiceClient {
    /// Create a new service client
    pub fn new(config: ServiceClientConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::missing_field("endpoint"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client around an existing `reqwest` client
    pub fn with_client(client: Client, config: ServiceClientConfig) -> Self {
        Self { client, config }
    }

    /// Service endpoint
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Project id
    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Client configuration
    pub fn config(&self) -> &ServiceClientConfig {
        &self.config
    }

    /// Join a relative path onto the endpoint.
    ///
    /// Absolute URLs pass through unchanged.
    pub fn resource_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Send one request and check the response code
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let mut req = self.client.request(method.into(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(token) = &self.config.auth_token {
            req = req.header(AUTH_TOKEN_HEADER, token.as_str());
        }

        if let Some(body) = options.body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        for (key, value) in &options.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        debug!("Sending request: {} {}", method, url);
        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        let accepted = match &options.ok_codes {
            Some(codes) => codes.contains(&status),
            None => (200..300).contains(&status),
        };

        if !accepted {
            let expected = options
                .ok_codes
                .unwrap_or_else(|| (200..300).collect::<Vec<u16>>());
            debug!("Unexpected response code {status} for {method} {url}");
            return Err(Error::unexpected_status(
                method.as_str(),
                url,
                status,
                expected,
                body,
            ));
        }

        debug!("Request succeeded: {} {} ({})", method, url, status);
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.config.endpoint)
            .field("project_id", &self.config.project_id)
            .field("region", &self.config.region)
            .field("has_auth_token", &self.config.auth_token.is_some())
            .finish_non_exhaustive()
    }
}
