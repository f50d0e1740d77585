//! CLI for the courier request transport.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use courier_core::config;
use std::path::PathBuf;

use commands::{run_get, run_pick, run_post, run_upload};

/// Top-level CLI for the courier request transport.
#[derive(Debug, Parser)]
#[command(name = "courier")]
#[command(about = "courier: HTTP requests with blended transfer progress", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send a GET request; data pairs are folded into the query string.
    Get {
        /// Target URL.
        url: String,
        /// Data pair `key=value`; repeatable.
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,
        /// Extra header `Name: value`; repeatable.
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
        header: Vec<String>,
        /// Upload share of the progress scale (0-100).
        #[arg(long, value_name = "N")]
        ratio: Option<u8>,
    },

    /// Send a POST request (JSON body by default).
    Post {
        /// Target URL.
        url: String,
        /// Data pair `key=value`; repeatable.
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,
        /// Raw JSON body (overrides -d pairs).
        #[arg(long, value_name = "JSON", conflicts_with = "data")]
        json: Option<String>,
        /// Send the pairs urlencoded instead of as JSON.
        #[arg(long)]
        urlencoded: bool,
        /// Extra header `Name: value`; repeatable.
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
        header: Vec<String>,
        /// Upload share of the progress scale (0-100).
        #[arg(long, value_name = "N")]
        ratio: Option<u8>,
    },

    /// Upload files as multipart/form-data (select, then POST).
    Upload {
        /// Target URL.
        url: String,
        /// Files to upload.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Multipart field name for the files.
        #[arg(long, default_value = "files", value_name = "NAME")]
        field: String,
        /// Extra data pair `key=value` appended to the form; repeatable.
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,
        /// Accept filter the files must match, e.g. `image/*`.
        #[arg(long, default_value = "*/*", value_name = "PATTERN")]
        accept: String,
        /// Extra header `Name: value`; repeatable.
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
        header: Vec<String>,
        /// Upload share of the progress scale (0-100).
        #[arg(long, value_name = "N")]
        ratio: Option<u8>,
    },

    /// Run file selection only and list what would be uploaded.
    Pick {
        /// Candidate files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Accept filter the files must match.
        #[arg(long, default_value = "*/*", value_name = "PATTERN")]
        accept: String,
        /// Allow more than one file.
        #[arg(long)]
        multiple: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                url,
                data,
                header,
                ratio,
            } => run_get(&cfg, &url, &data, &header, ratio).await?,
            CliCommand::Post {
                url,
                data,
                json,
                urlencoded,
                header,
                ratio,
            } => run_post(&cfg, &url, &data, json.as_deref(), urlencoded, &header, ratio).await?,
            CliCommand::Upload {
                url,
                files,
                field,
                data,
                accept,
                header,
                ratio,
            } => run_upload(&cfg, &url, files, &field, &data, &accept, &header, ratio).await?,
            CliCommand::Pick {
                files,
                accept,
                multiple,
            } => run_pick(files, &accept, multiple).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
