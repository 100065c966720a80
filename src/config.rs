//! Provider configuration
//!
//! Settings needed to reach one cloud service, loaded from a YAML file and
//! overridden by `HWC_*` environment variables:
//!
//! ```yaml
//! endpoint: https://cce.ap-southeast-1.myhuaweicloud.com
//! project_id: 0123456789abcdef
//! region: ap-southeast-1
//! timeout_secs: 60
//! headers:
//!   X-Language: en-us
//! ```

use crate::client::ServiceClientConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `endpoint`
pub const ENV_ENDPOINT: &str = "HWC_ENDPOINT";
/// Environment variable overriding `project_id`
pub const ENV_PROJECT_ID: &str = "HWC_PROJECT_ID";
/// Environment variable overriding `region`
pub const ENV_REGION: &str = "HWC_REGION";
/// Environment variable overriding `auth_token`
pub const ENV_AUTH_TOKEN: &str = "HWC_AUTH_TOKEN";

/// Connection settings for the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Service endpoint
    pub endpoint: String,

    /// Project id substituted for `{project_id}`
    pub project_id: String,

    /// Region name
    pub region: Option<String>,

    /// Pre-issued token sent as `X-Auth-Token`
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Skip TLS verification
    pub insecure: bool,

    /// Headers sent with every request
    pub headers: HashMap<String, String>,

    /// User agent override
    pub user_agent: Option<String>,
}

impl ProviderConfig {
    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        debug!("Loaded provider config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `HWC_*` overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a lookup function. Empty values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_ENDPOINT) {
            self.endpoint = v;
        }
        if let Some(v) = get(ENV_PROJECT_ID) {
            self.project_id = v;
        }
        if let Some(v) = get(ENV_REGION) {
            self.region = Some(v);
        }
        if let Some(v) = get(ENV_AUTH_TOKEN) {
            self.auth_token = Some(v);
        }
        self
    }

    /// Check the fields every request needs
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }

    /// Build the service client configuration
    pub fn to_client_config(&self) -> Result<ServiceClientConfig> {
        self.validate()?;

        let mut builder = ServiceClientConfig::builder()
            .endpoint(self.endpoint.clone())
            .project_id(self.project_id.clone())
            .insecure(self.insecure);

        if let Some(region) = &self.region {
            builder = builder.region(region.clone());
        }
        if let Some(token) = &self.auth_token {
            builder = builder.auth_token(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        for (k, v) in &self.headers {
            builder = builder.header(k.clone(), v.clone());
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r"
endpoint: https://cce.example.com
project_id: p1
region: ap-southeast-1
timeout_secs: 5
headers:
  X-Language: en-us
";

    #[test]
    fn test_from_yaml() {
        let config = ProviderConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.endpoint, "https://cce.example.com");
        assert_eq!(config.project_id, "p1");
        assert_eq!(config.timeout_secs, Some(5));
        assert!(!config.insecure);
        assert_eq!(config.headers["X-Language"], "en-us");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(config.region.as_deref(), Some("ap-southeast-1"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProviderConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ProviderConfig::from_yaml("endpoint: [unclosed").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PROJECT_ID, "p2"),
            (ENV_AUTH_TOKEN, "tok"),
            (ENV_REGION, ""),
        ]);
        let config = ProviderConfig::from_yaml(YAML)
            .unwrap()
            .with_overrides(|k| env.get(k).map(ToString::to_string));

        assert_eq!(config.project_id, "p2");
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.region.as_deref(), Some("ap-southeast-1"));
        assert_eq!(config.endpoint, "https://cce.example.com");
    }

    #[test]
    fn test_to_client_config() {
        let client = ProviderConfig::from_yaml(YAML)
            .unwrap()
            .to_client_config()
            .unwrap();
        assert_eq!(client.project_id, "p1");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.default_headers["X-Language"], "en-us");
    }

    #[test]
    fn test_validate() {
        let err = ProviderConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));

        let config = ProviderConfig {
            endpoint: "cce.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
