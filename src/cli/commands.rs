//! CLI commands and argument parsing

use crate::types::Method;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Issue provider API requests from the command line
#[derive(Parser, Debug)]
#[command(name = "tf-httphelper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service endpoint, overrides the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Project id, overrides the config file
    #[arg(long, global = true)]
    pub project_id: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a request and print the (aggregated) JSON body
    Request(RequestArgs),

    /// Poll a status field until it reaches a terminal state
    Wait(WaitArgs),
}

/// Arguments of `request`
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: Method,

    /// Request path relative to the endpoint, or an absolute URL
    #[arg(short, long)]
    pub uri: String,

    /// Query parameter `key=value` (repeatable; repeated keys form a list)
    #[arg(short, long = "query", value_name = "KEY=VALUE")]
    pub query: Vec<String>,

    /// Path placeholder `key=value`
    #[arg(long = "path-param", value_name = "KEY=VALUE")]
    pub path_params: Vec<String>,

    /// Request header `key=value`
    #[arg(short = 'H', long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,

    /// JSON request body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Accepted status codes (default: any 2xx)
    #[arg(long = "ok-code")]
    pub ok_codes: Vec<u16>,

    /// Pagination strategy
    #[arg(long, value_enum)]
    pub pager: Option<PagerKind>,

    /// Path of the item array in each page
    #[arg(long, default_value = "")]
    pub data_path: String,

    /// Marker pager: path of the next marker; link pager: path of the next link
    #[arg(long, default_value = "page_info.next_marker")]
    pub next_exp: String,

    /// Marker query key
    #[arg(long, default_value = "marker")]
    pub marker_key: String,

    /// Offset query key
    #[arg(long, default_value = "offset")]
    pub offset_key: String,

    /// Limit (or page size) query key
    #[arg(long, default_value = "limit")]
    pub limit_key: String,

    /// Page number query key
    #[arg(long, default_value = "page")]
    pub page_key: String,

    /// Page size; 0 lets the offset pager infer it from the first page
    #[arg(long, default_value = "0")]
    pub page_size: u64,

    /// Print only the value at this path
    #[arg(long)]
    pub path: Option<String>,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments of `wait`
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Polled path relative to the endpoint, or an absolute URL
    #[arg(short, long)]
    pub uri: String,

    /// Path placeholder `key=value`
    #[arg(long = "path-param", value_name = "KEY=VALUE")]
    pub path_params: Vec<String>,

    /// Path of the status field in the response
    #[arg(long, default_value = "status.phase")]
    pub status_path: String,

    /// Status meaning success (repeatable)
    #[arg(long, required = true)]
    pub success: Vec<String>,

    /// Status meaning failure (repeatable)
    #[arg(long)]
    pub failure: Vec<String>,

    /// Treat a 404 as success (delete polling)
    #[arg(long)]
    pub gone_ok: bool,

    /// Overall timeout in seconds
    #[arg(long, default_value = "1200")]
    pub timeout: u64,

    /// Seconds before the first poll
    #[arg(long, default_value = "10")]
    pub delay: u64,

    /// Seconds between polls
    #[arg(long, default_value = "5")]
    pub interval: u64,
}

/// Pagination strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PagerKind {
    /// Marker/cursor echoed back as a query parameter
    Marker,
    /// Offset and limit
    Offset,
    /// Next link found in the body
    Link,
    /// Page number and page size
    PageSize,
}
