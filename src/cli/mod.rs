//! CLI module
//!
//! Command-line interface over the request helpers.
//!
//! # Commands
//!
//! - `request` - Send a request, walking pages, and print the JSON body
//! - `wait` - Poll a status field until success, failure or timeout

mod commands;
mod runner;

pub use commands::{Cli, Commands, PagerKind, RequestArgs, WaitArgs};
pub use runner::{
    execute_request, execute_wait, pager_config, parse_pairs, parse_query_args, Runner,
};
