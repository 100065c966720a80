//! JSON filter module
//!
//! Keeps the elements of one array inside a JSON document that satisfy a
//! set of conditions, leaving the rest of the document untouched.
//!
//! ```rust,ignore
//! let filtered = JsonFilter::new()
//!     .data(body)
//!     .from("clusters")
//!     .where_("status.phase", "=", json!("Available"))
//!     .get()?;
//! ```

mod json_filter;
mod types;

pub use json_filter::JsonFilter;
pub use types::{Condition, Operator, Predicate};
