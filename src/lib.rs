// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::float_cmp)]

//! # tf-httphelper
//!
//! REST helper layer for a cloud provider integration: typed query strings,
//! pluggable pagination, a fluent request builder, and helpers that turn
//! dynamic JSON responses into typed resource state.
//!
//! ## Features
//!
//! - **Query Serialization**: typed values, lists and maps into query strings
//! - **Pagination**: offset, marker, link, page number and custom pagers
//! - **Request Builder**: method, path placeholders, body, headers, ok codes
//! - **Flatten Helpers**: JSON paths into typed lists, maps and nested blocks
//! - **Filters and Polling**: result filtering, status field wait loops
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tf_httphelper::{HttpHelper, ServiceClient, ServiceClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ServiceClient::new(
//!         ServiceClientConfig::builder()
//!             .endpoint("https://cce.ap-southeast-1.myhuaweicloud.com")
//!             .project_id("0123456789abcdef")
//!             .build(),
//!     )?;
//!
//!     let clusters = HttpHelper::new(&client)
//!         .uri("autopilot/v3/projects/{project_id}/clusters")
//!         .marker_pager("items", "metadata.continue", "continue")
//!         .request()
//!         .await?
//!         .data()?;
//!
//!     println!("{clusters:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        services (cce_autopilot)            cli / config      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │  Query   │  Client   │  HttpHelper   │  Flatten  │   Wait    │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Values   │ Endpoint  │ Path render   │ Lists     │ Pending   │
//! │ Lists    │ Headers   │ Pagination    │ Maps      │ Target    │
//! │ Maps     │ Ok codes  │ Deep merge    │ Tags      │ Timeout   │
//! │          │           │ Filters       │ Scalars   │           │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shared type aliases
pub mod types;

/// Query parameter serialization
pub mod query;

/// JSON search, codec and merge
pub mod json;

/// Pagination strategies
pub mod pagination;

/// Service client
pub mod client;

/// Path placeholder rendering
pub mod template;

/// Fluent request builder
pub mod httphelper;

/// JSON to typed value projections
pub mod flatten;

/// Result filtering
pub mod filter;

/// Status polling
pub mod wait;

/// Resource request glue
pub mod services;

/// Provider configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use client::{ServiceClient, ServiceClientConfig};
pub use error::{Error, Result};
pub use filter::JsonFilter;
pub use httphelper::{HttpHelper, HttpResponse};
pub use json::JsonResult;
pub use pagination::{PageResult, Pager, PagerConfig};
pub use query::{QueryParams, QueryValue};
pub use types::*;
pub use wait::{StateChangeConf, StateRefresh};
