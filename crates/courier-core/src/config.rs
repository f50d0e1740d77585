use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Global defaults loaded from `~/.config/courier/config.toml`.
///
/// These seed the CLI's request params; anything given on the command line
/// wins over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Share of the progress scale given to the upload phase (0-100).
    pub upload_ratio: u8,
    /// Headers attached to every request, in addition to the fixed
    /// identification header.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
    /// Optional User-Agent override (libcurl's default when absent).
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            upload_ratio: 90,
            default_headers: HashMap::new(),
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("courier")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CourierConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CourierConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CourierConfig = toml::from_str(&data)?;
    Ok(cfg)
}
