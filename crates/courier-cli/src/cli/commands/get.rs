//! `courier get <url>` – GET with query-string data.

use anyhow::Result;
use courier_core::config::CourierConfig;
use courier_core::{Client, RequestParams};

use super::{apply_headers, parse_data_pairs, progress_bar, report};

pub async fn run_get(
    cfg: &CourierConfig,
    url: &str,
    data: &[String],
    headers: &[String],
    ratio: Option<u8>,
) -> Result<()> {
    let mut params = RequestParams::new(url)
        .with_upload_ratio(i64::from(ratio.unwrap_or(cfg.upload_ratio)))
        .with_progress(progress_bar());
    if let Some(value) = parse_data_pairs(data)? {
        params = params.with_data(value);
    }
    let params = apply_headers(params, cfg, headers)?;

    let client = Client::new();
    report(client.get(params).await)
}
