//! `gproxy mirrors` – list the mirror table.

use anyhow::Result;
use gproxy_core::config::GproxyConfig;
use gproxy_core::mirror::Mirror;

use crate::cli::host;

pub fn run_mirrors(cfg: &GproxyConfig) -> Result<()> {
    let plugin = host::activate_settings_only(cfg)?;
    let selected = plugin.settings().map(|s| s.mirror_server);

    println!("  {:<10} {:<32} {:<32} {}", "ID", "DOWNLOAD", "RAW", "REPO");
    for mirror in Mirror::ALL {
        let e = mirror.endpoints();
        let marker = if Some(mirror) == selected { '*' } else { ' ' };
        println!(
            "{} {:<10} {:<32} {:<32} {}",
            marker,
            mirror.id(),
            e.download,
            e.raw,
            e.repo
        );
    }
    Ok(())
}
