//! Query parameter serialization
//!
//! Converts typed query values into URL query strings.
//!
//! # Overview
//!
//! Callers build a [`QueryParams`] map from a closed set of [`QueryValue`]
//! variants. The encoder drops zero values, flattens lists into repeated
//! keys and renders string maps in the vendor's `{'k':'v'}` form. Keys are
//! always emitted in alphabetical order.

mod encode;
mod types;

pub use encode::{append_to_url, encode, format_string_map};
pub use types::{QueryParams, QueryValue};
