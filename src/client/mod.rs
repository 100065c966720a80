//! Service client module
//!
//! Thin wrapper around a `reqwest` client bound to one service endpoint and
//! project. It sends a single request and checks the response code; it
//! never retries.

mod service;

pub use service::{
    RawResponse, RequestOptions, ServiceClient, ServiceClientConfig, ServiceClientConfigBuilder,
};
