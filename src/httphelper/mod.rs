//! Fluent request builder
//!
//! # Overview
//!
//! [`HttpHelper`] accumulates everything one logical API call needs
//! (method, path, query, body, headers, accepted codes, an optional pager
//! and filters) and is consumed by [`HttpHelper::request`]. Without a pager
//! it issues one call; with a pager it walks every page and deep-merges the
//! bodies into one document.
//!
//! ```rust,ignore
//! let clusters = HttpHelper::new(&client)
//!     .method(Method::GET)
//!     .uri("autopilot/v3/projects/{project_id}/clusters")
//!     .marker_pager("items", "metadata.continue", "marker")
//!     .request()
//!     .await?
//!     .result()?;
//! ```

mod builder;
mod response;

pub use builder::HttpHelper;
pub use response::HttpResponse;
