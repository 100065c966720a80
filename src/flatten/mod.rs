//! Flatten helpers
//!
//! Project parts of an API response onto the typed collections used for
//! resource state. Every helper reads through a dotted path (see
//! [`crate::json::search`]), never mutates its input, and degrades to an
//! empty collection when the path is missing. Elements of an unexpected
//! type are skipped.

mod lists;
mod maps;
mod scalars;

pub use lists::{bool_list, float_list, int_list, object_list, object_to_list, string_list};
pub use maps::{bool_map, float_map, int_map, object_map, string_map, tags_to_map};
pub use scalars::{optional_bool, optional_f64, optional_i64, optional_string};
