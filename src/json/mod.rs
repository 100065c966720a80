//! Dynamic JSON access
//!
//! Remote API responses are not under our control, so they are kept as an
//! untyped [`serde_json::Value`] tree and read through dotted paths.
//!
//! # Path Syntax
//!
//! - `metadata.uid` - object keys separated by dots
//! - `vpcs.0.id` or `vpcs[0].id` - array index (negative counts from the end)
//! - `items[*].id` or `items.*.id` - projection over every element
//! - `$..id` or `$.items[?(@.rel=='next')]` - full JSONPath, evaluated by `jsonpath-rust`

mod codec;
mod merge;
mod path;
mod result;

pub use codec::{marshal_body, parse_body, read_body, remove_nil};
pub use merge::merge_values;
pub use path::{count_items, search, search_str};
pub use result::JsonResult;
