//! `gproxy status` – show current settings.

use anyhow::Result;
use gproxy_core::config::GproxyConfig;

use crate::cli::host;

pub fn run_status(cfg: &GproxyConfig) -> Result<()> {
    let plugin = host::activate_settings_only(cfg)?;
    println!("plugin:   {}", plugin.name());
    if let Some(s) = plugin.settings() {
        println!("enabled:  {}", s.enabled);
        println!("mirror:   {}", s.mirror_server);
        println!("language: {}", s.language.id());
    }
    println!("settings: {}", cfg.settings_store()?.path().display());
    Ok(())
}
