use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::settings::{JsonFileStore, Settings};

/// Timeouts for the HEAD probe issued by the CLI host (optional `[probe]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/gproxy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GproxyConfig {
    /// Name used in log lines and as the plugin's display name.
    pub plugin_name: String,
    /// Settings file override; defaults to `~/.local/share/gproxy/data.json`.
    pub data_path: Option<PathBuf>,
    pub probe: ProbeConfig,
    /// Settings used for any key the settings file does not have.
    pub defaults: Settings,
}

impl Default for GproxyConfig {
    fn default() -> Self {
        Self {
            plugin_name: "gproxy".to_string(),
            data_path: None,
            probe: ProbeConfig::default(),
            defaults: Settings::default(),
        }
    }
}

impl GproxyConfig {
    /// Settings store at `data_path`, or the XDG default.
    pub fn settings_store(&self) -> Result<JsonFileStore> {
        let path = match &self.data_path {
            Some(p) => p.clone(),
            None => JsonFileStore::default_path()?,
        };
        Ok(JsonFileStore::new(path))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gproxy")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GproxyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GproxyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GproxyConfig = toml::from_str(&data)?;
    Ok(cfg)
}
