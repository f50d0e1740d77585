//! Subcommand implementations and shared argument plumbing.

mod get;
mod pick;
mod post;
mod upload;

pub use get::run_get;
pub use pick::run_pick;
pub use post::run_post;
pub use upload::run_upload;

use anyhow::{bail, Context, Result};
use courier_core::config::CourierConfig;
use courier_core::{Body, Error, ProgressFn, RequestParams, Response};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Parses repeated `key=value` arguments into a JSON mapping. Values stay
/// strings; servers coerce as they see fit.
pub(super) fn parse_data_pairs(pairs: &[String]) -> Result<Option<Value>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("data pair `{pair}` is not key=value"))?;
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(Some(Value::Object(map)))
}

/// Seeds params with config-file defaults, then applies `Name: value`
/// header arguments (command line wins over the file).
pub(super) fn apply_headers(
    mut params: RequestParams,
    cfg: &CourierConfig,
    headers: &[String],
) -> Result<RequestParams> {
    for (name, value) in &cfg.default_headers {
        params = params.with_header(name.clone(), value.clone());
    }
    if let Some(agent) = &cfg.user_agent {
        params = params.with_header("User-Agent", agent.clone());
    }
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("header `{header}` is not `Name: value`");
        };
        params = params.with_header(name.trim(), value.trim());
    }
    Ok(params)
}

/// Progress callback rendering a bar on stderr.
pub(super) fn progress_bar() -> ProgressFn {
    Arc::new(|pct| {
        let filled = usize::from(pct) * 30 / 100;
        eprint!("\r[{:<30}] {:>3}%", "#".repeat(filled), pct);
        if pct >= 100 {
            eprintln!();
        }
    })
}

/// Prints a classified outcome: status to stderr, body to stdout.
/// A non-2xx response is reported, then surfaced as a failure.
pub(super) fn report(outcome: courier_core::Result<Response>) -> Result<()> {
    match outcome {
        Ok(response) => {
            eprintln!("HTTP {}", response.status);
            print_body(&response.body);
            Ok(())
        }
        Err(Error::Http(response)) => {
            eprintln!("HTTP {}", response.status);
            print_body(&response.body);
            bail!("server rejected the request with HTTP {}", response.status)
        }
        Err(other) => Err(other.into()),
    }
}

fn print_body(body: &Body) {
    match body {
        Body::Json(value) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{value}"),
        },
        Body::Text(text) if text.is_empty() => {}
        Body::Text(text) => println!("{text}"),
    }
}
