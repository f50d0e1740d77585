//! `courier pick <files>...` – dry-run file selection.

use anyhow::Result;
use courier_core::{Client, PathPicker, RequestParams};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run_pick(files: Vec<PathBuf>, accept: &str, multiple: bool) -> Result<()> {
    // The URL is unused by selection but the params must still validate.
    let params = RequestParams::new("/")
        .with_accept(accept)
        .with_multiple(multiple);

    let picker = Arc::new(PathPicker::new(files));
    let client = Client::with_picker_instance(picker);
    let selected = client.select_files(params).await?;

    for file in &selected {
        println!("{}\t{}\t{} bytes", file.name, file.mime, file.data.len());
    }
    Ok(())
}
