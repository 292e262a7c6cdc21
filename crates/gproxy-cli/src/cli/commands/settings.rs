//! `gproxy toggle`, `gproxy set-mirror <id>`, `gproxy enable|disable`.

use anyhow::Result;
use gproxy_core::config::GproxyConfig;
use gproxy_core::mirror::Mirror;

use crate::cli::host;

pub fn run_toggle(cfg: &GproxyConfig) -> Result<()> {
    let mut plugin = host::activate_settings_only(cfg)?;
    plugin.toggle()?;
    Ok(())
}

pub fn run_set_mirror(cfg: &GproxyConfig, id: &str) -> Result<()> {
    let mirror: Mirror = id.parse()?;
    let mut plugin = host::activate_settings_only(cfg)?;
    plugin.set_mirror(mirror)?;
    println!("Mirror set to {mirror}");
    Ok(())
}

pub fn run_set_enabled(cfg: &GproxyConfig, enabled: bool) -> Result<()> {
    let mut plugin = host::activate_settings_only(cfg)?;
    plugin.set_enabled(enabled)?;
    println!("enabled: {enabled}");
    Ok(())
}
