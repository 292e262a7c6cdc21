//! `gproxy resolve <url>` – show what a URL is rewritten to.

use anyhow::Result;
use gproxy_core::config::GproxyConfig;
use gproxy_core::resolver::{self, ResolveResult};

use crate::cli::host;

pub fn run_resolve(cfg: &GproxyConfig, url: &str, mirror: Option<&str>) -> Result<()> {
    let result = match mirror {
        Some(id) => resolver::resolve_by_id(url, id)?,
        None => {
            let plugin = host::activate_settings_only(cfg)?;
            let mirror = plugin
                .settings()
                .map(|s| s.mirror_server)
                .unwrap_or_default();
            resolver::resolve(url, mirror)
        }
    };
    print!("{}", format_result(&result));
    if !result.rewritten(url) {
        tracing::debug!("{} is not a GitHub URL; left unchanged", url);
    }
    Ok(())
}

fn format_result(result: &ResolveResult) -> String {
    let mut out = format!("{}\n", result.url);
    if let Some(headers) = &result.headers {
        let mut headers: Vec<_> = headers.iter().collect();
        headers.sort();
        for (name, value) in headers {
            out.push_str(&format!("  {name}: {value}\n"));
        }
    }
    out
}
