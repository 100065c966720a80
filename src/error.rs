//! Error types for tf-httphelper
//!
//! This module defines the error hierarchy for the whole helper layer.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for tf-httphelper
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Expected HTTP response code {expected:?} when accessing [{method} {url}], but got {status} instead: {body}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        expected: Vec<u16>,
        body: String,
    },

    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Filter error: {message}")]
    Filter { message: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Unresolved placeholder in path: {placeholder}")]
    UnresolvedPlaceholder { placeholder: String },

    // ============================================================================
    // Polling Errors
    // ============================================================================
    #[error("Timeout while waiting for state to become '{target}' (last state: '{last_state}', timeout: {timeout_secs}s)")]
    WaitTimeout {
        target: String,
        last_state: String,
        timeout_secs: u64,
    },

    #[error("Unexpected state '{state}', wanted target '{target}'")]
    UnexpectedState { state: String, target: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create a filter error
    pub fn filter(message: impl Into<String>) -> Self {
        Self::Filter {
            message: message.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        expected: Vec<u16>,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            method: method.into(),
            url: url.into(),
            status,
            expected,
            body: body.into(),
        }
    }

    /// Whether the error means the remote resource no longer exists.
    ///
    /// Callers use this to drop a resource from state instead of failing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::UnexpectedStatus { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for tf-httphelper
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("endpoint");
        assert_eq!(err.to_string(), "Missing required config field: endpoint");

        let err = Error::unexpected_status("GET", "https://x/v1/a", 500, vec![200], "boom");
        assert_eq!(
            err.to_string(),
            "Expected HTTP response code [200] when accessing [GET https://x/v1/a], but got 500 instead: boom"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("gone").is_not_found());
        assert!(Error::unexpected_status("GET", "u", 404, vec![200], "").is_not_found());

        assert!(!Error::unexpected_status("GET", "u", 400, vec![200], "").is_not_found());
        assert!(!Error::config("test").is_not_found());
    }

    #[test]
    fn test_status() {
        let err = Error::unexpected_status("DELETE", "u", 409, vec![204], "");
        assert_eq!(err.status(), Some(409));
        assert_eq!(Error::not_found("x").status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
