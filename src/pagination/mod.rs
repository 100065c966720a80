//! Pagination module
//!
//! Supports: Offset, Marker, Link, Page Number, Custom
//!
//! # Overview
//!
//! The pagination module provides a unified interface for the pagination
//! shapes found across cloud REST APIs. Each strategy inspects the current
//! page to decide whether it is empty and to compute the next page URL.
//! Strategies hold configuration only; all cross-page state travels in the
//! next URL's query string.

mod strategies;
mod types;

pub use strategies::{
    query_number, CustomPager, LinkPager, MarkerPager, NextUrlFn, OffsetPager, PageSizePager,
};
pub use types::{query_value, with_query_value, PageResult, Pager, PagerConfig};

#[cfg(test)]
mod tests;
