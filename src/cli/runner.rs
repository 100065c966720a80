//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PagerKind, RequestArgs, WaitArgs};
use crate::client::ServiceClient;
use crate::config::ProviderConfig;
use crate::error::{Error, Result, ResultExt};
use crate::httphelper::HttpHelper;
use crate::json::search;
use crate::pagination::PagerConfig;
use crate::query::{QueryParams, QueryValue};
use crate::types::JsonValue;
use crate::wait::{StateChangeConf, StatusFieldRefresh, STATE_COMPLETED, STATE_PENDING};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, labelling any failure with the command
    pub async fn run(&self) -> anyhow::Result<()> {
        let outcome = self.dispatch().await;
        anyhow::Context::with_context(outcome, || format!("{} failed", self.label()))
    }

    async fn dispatch(&self) -> Result<()> {
        let client = self.client()?;

        match &self.cli.command {
            Commands::Request(args) => {
                let output = execute_request(&client, args).await?;
                println!("{output}");
            }
            Commands::Wait(args) => {
                let state = execute_wait(&client, args).await?;
                println!("{state}");
            }
        }
        Ok(())
    }

    fn label(&self) -> String {
        match &self.cli.command {
            Commands::Request(args) => format!("request {} {}", args.method, args.uri),
            Commands::Wait(args) => format!("wait on {}", args.uri),
        }
    }

    /// Resolve the provider configuration: file, then environment, then flags
    fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ProviderConfig::load(path)?,
            None => ProviderConfig::default(),
        }
        .with_env();

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(project_id) = &self.cli.project_id {
            config.project_id.clone_from(project_id);
        }
        Ok(config)
    }

    fn client(&self) -> Result<ServiceClient> {
        let config = self.provider_config()?;
        debug!("Using endpoint {}", config.endpoint);
        ServiceClient::new(config.to_client_config()?)
    }
}

// ============================================================================
// Argument Parsing
// ============================================================================

/// Split a `key=value` argument
fn split_pair(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| Error::config(format!("expected KEY=VALUE, got '{arg}'")))
}

/// Read a value as JSON when it parses as a scalar or array, else as a string
fn parse_query_value(raw: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(raw) {
        Ok(v @ (JsonValue::Number(_) | JsonValue::Bool(_) | JsonValue::Array(_))) => v,
        _ => JsonValue::String(raw.to_string()),
    }
}

/// Build query parameters from `key=value` arguments.
///
/// A key given more than once becomes a list.
pub fn parse_query_args(args: &[String]) -> Result<QueryParams> {
    let mut grouped: BTreeMap<&str, Vec<JsonValue>> = BTreeMap::new();
    for arg in args {
        let (key, value) = split_pair(arg)?;
        grouped.entry(key).or_default().push(parse_query_value(value));
    }

    let mut params = QueryParams::new();
    for (key, mut values) in grouped {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            JsonValue::Array(values)
        };
        params.insert(key, QueryValue::from_json(&value));
    }
    Ok(params)
}

/// Build a map from `key=value` arguments
pub fn parse_pairs(args: &[String]) -> Result<BTreeMap<String, String>> {
    args.iter()
        .map(|arg| split_pair(arg).map(|(k, v)| (k.to_string(), v.to_string())))
        .collect()
}

// ============================================================================
// Commands
// ============================================================================

/// Pager selected by the `request` flags
pub fn pager_config(args: &RequestArgs) -> Option<PagerConfig> {
    let data_path = args.data_path.clone();
    let config = match args.pager? {
        PagerKind::Marker => PagerConfig::marker(data_path, &args.next_exp, &args.marker_key),
        PagerKind::Offset => {
            PagerConfig::offset(data_path, &args.offset_key, &args.limit_key, args.page_size)
        }
        PagerKind::Link => PagerConfig::link(data_path, &args.next_exp),
        PagerKind::PageSize => {
            PagerConfig::page_size(data_path, &args.page_key, &args.limit_key, args.page_size)
        }
    };
    Some(config)
}

/// Run `request` and render its output
pub async fn execute_request(client: &ServiceClient, args: &RequestArgs) -> Result<String> {
    let mut helper = HttpHelper::new(client)
        .method(args.method)
        .uri(args.uri.clone())
        .query(parse_query_args(&args.query)?)
        .headers(parse_pairs(&args.headers)?);

    for (k, v) in parse_pairs(&args.path_params)? {
        helper = helper.path_param(k, v);
    }
    if let Some(body) = &args.body {
        let body = serde_json::from_str::<JsonValue>(body).context("invalid --body JSON")?;
        helper = helper.body(body);
    }
    if !args.ok_codes.is_empty() {
        helper = helper.ok_codes(args.ok_codes.iter().copied());
    }

    if let Some(pager) = pager_config(args) {
        helper = helper.pager_config(&pager);
    }

    let response = helper.request().await?;
    info!(
        "{} {} returned {} ({} page(s))",
        args.method,
        response.url(),
        response.status(),
        response.pages()
    );

    if response.is_empty() {
        return Ok(String::new());
    }

    let value = response.value()?;
    let value = match &args.path {
        Some(path) => search(&value, path).unwrap_or(JsonValue::Null),
        None => value,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        value.to_string()
    };
    Ok(rendered)
}

/// Run `wait` and return the final state
pub async fn execute_wait(client: &ServiceClient, args: &WaitArgs) -> Result<String> {
    let mut refresh = StatusFieldRefresh::new(client, args.uri.clone(), args.status_path.clone())
        .success(args.success.iter().cloned())
        .failure(args.failure.iter().cloned());
    if args.gone_ok {
        refresh = refresh.missing_as(STATE_COMPLETED);
    }
    for (k, v) in parse_pairs(&args.path_params)? {
        refresh = refresh.path_param(k, v);
    }

    let conf = StateChangeConf::new([STATE_PENDING], [STATE_COMPLETED])
        .timeout(Duration::from_secs(args.timeout))
        .delay(Duration::from_secs(args.delay))
        .poll_interval(Duration::from_secs(args.interval));

    let result = conf.wait_for_state(&refresh).await?;
    Ok(result.state)
}
