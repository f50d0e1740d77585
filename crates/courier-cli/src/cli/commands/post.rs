//! `courier post <url>` – POST with a JSON or urlencoded body.

use anyhow::{Context, Result};
use courier_core::config::CourierConfig;
use courier_core::{Client, RequestParams, URLENCODED};
use serde_json::Value;

use super::{apply_headers, parse_data_pairs, progress_bar, report};

#[allow(clippy::too_many_arguments)]
pub async fn run_post(
    cfg: &CourierConfig,
    url: &str,
    data: &[String],
    json: Option<&str>,
    urlencoded: bool,
    headers: &[String],
    ratio: Option<u8>,
) -> Result<()> {
    let mut params = RequestParams::new(url)
        .with_upload_ratio(i64::from(ratio.unwrap_or(cfg.upload_ratio)))
        .with_progress(progress_bar());

    if let Some(raw) = json {
        let value: Value = serde_json::from_str(raw).context("`--json` is not valid JSON")?;
        params = params.with_data(value);
    } else if let Some(value) = parse_data_pairs(data)? {
        params = params.with_data(value);
    }
    if urlencoded {
        params = params.with_content_type(URLENCODED);
    }
    let params = apply_headers(params, cfg, headers)?;

    let client = Client::new();
    report(client.post(params).await)
}
