//! `gproxy fetch <url>` – send a request through the intercepted dispatch.

use anyhow::Result;
use gproxy_core::config::GproxyConfig;
use gproxy_core::host::Host;
use gproxy_core::interceptor::RequestOptions;
use gproxy_core::plugin::Plugin;
use serde_json::Value;

use crate::cli::host::CliHost;

pub fn run_fetch(cfg: &GproxyConfig, url: &str, channel: &str) -> Result<()> {
    let (host, sent) = CliHost::with_probe(cfg.settings_store()?, cfg.probe.clone());
    let mut plugin = Plugin::new(host, cfg.plugin_name.clone(), cfg.defaults.clone());
    plugin.activate()?;

    let mut options = RequestOptions::new();
    options.insert("url".to_string(), Value::String(url.to_string()));
    options.insert("method".to_string(), Value::String("HEAD".to_string()));

    let outcome = match plugin.host().dispatch_slot() {
        Some(slot) => slot.dispatch(channel, "gproxy-cli", options, &[]),
        None => Ok(()),
    };
    plugin.deactivate();
    outcome?;

    let sent = sent.borrow();
    if sent.is_empty() {
        println!("Nothing sent on channel {channel}");
    }
    for (requested, headers, result) in sent.iter() {
        println!("requested: {requested}");
        if requested != url {
            println!("  (rewritten from {url})");
        }
        println!("final:     {}", result.effective_url);
        println!("status:    {}", result.status);
        if let Some(len) = result.content_length {
            println!("size:      {len}");
        }
        if let Some(ct) = &result.content_type {
            println!("type:      {ct}");
        }
        if let Some(server) = &result.server {
            println!("server:    {server}");
        }
        tracing::debug!("sent headers: {:?}", headers);
    }
    Ok(())
}
