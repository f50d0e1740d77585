//! `courier upload <url> <files>...` – multipart file upload.

use anyhow::Result;
use courier_core::config::CourierConfig;
use courier_core::{Client, PathPicker, RequestParams};
use std::path::PathBuf;
use std::sync::Arc;

use super::{apply_headers, parse_data_pairs, progress_bar, report};

#[allow(clippy::too_many_arguments)]
pub async fn run_upload(
    cfg: &CourierConfig,
    url: &str,
    files: Vec<PathBuf>,
    field: &str,
    data: &[String],
    accept: &str,
    headers: &[String],
    ratio: Option<u8>,
) -> Result<()> {
    let multiple = files.len() > 1;
    let mut params = RequestParams::new(url)
        .with_upload_ratio(i64::from(ratio.unwrap_or(cfg.upload_ratio)))
        .with_progress(progress_bar())
        .with_field_name(field)
        .with_accept(accept)
        .with_multiple(multiple)
        .with_before_send(Arc::new(|selected| {
            for file in selected {
                tracing::info!(name = %file.name, bytes = file.data.len(), "uploading");
            }
        }));
    if let Some(value) = parse_data_pairs(data)? {
        params = params.with_data(value);
    }
    let params = apply_headers(params, cfg, headers)?;

    let picker = Arc::new(PathPicker::new(files));
    let client = Client::with_picker_instance(picker);
    report(client.transport(params).await)
}
