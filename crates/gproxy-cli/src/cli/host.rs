//! The CLI as a plugin host: settings in a JSON file, notices on stdout, and
//! optionally a dispatch slot whose original function issues HEAD probes.

use anyhow::Result;
use gproxy_core::config::{GproxyConfig, ProbeConfig};
use gproxy_core::fetch_head::{self, HeadResult};
use gproxy_core::host::{Command, Host};
use gproxy_core::interceptor::{Dispatch, DispatchSlot, RequestOptions, REQUEST_URL_CHANNEL};
use gproxy_core::plugin::Plugin;
use gproxy_core::settings::{JsonFileStore, SettingsPanel};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Requests the original dispatch actually sent: `(url, headers, result)`.
pub type SentLog = Rc<RefCell<Vec<(String, HashMap<String, String>, HeadResult)>>>;

pub struct CliHost {
    store: JsonFileStore,
    slot: Option<DispatchSlot>,
}

impl CliHost {
    /// Host without a dispatch slot; the plugin only manages settings.
    pub fn settings_only(store: JsonFileStore) -> Self {
        Self { store, slot: None }
    }

    /// Host whose dispatch probes `request-url` targets over HTTP.
    pub fn with_probe(store: JsonFileStore, probe: ProbeConfig) -> (Self, SentLog) {
        let sent: SentLog = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&sent);
        let original: Dispatch = Rc::new(
            move |channel: &str, _salt: &str, options: RequestOptions, _rest: &[Value]| -> Result<()> {
                if channel != REQUEST_URL_CHANNEL {
                    tracing::info!("dispatch on channel {} (nothing to send)", channel);
                    return Ok(());
                }
                let url = options
                    .get("url")
                    .and_then(Value::as_str)
                    .ok_or_else(|| anyhow::anyhow!("request options have no url"))?
                    .to_string();
                let headers = headers_from_options(&options);
                let result = fetch_head::probe(&url, &headers, &probe)?;
                log.borrow_mut().push((url, headers, result));
                Ok(())
            },
        );
        let host = Self {
            store,
            slot: Some(DispatchSlot::new(original)),
        };
        (host, sent)
    }
}

/// String-valued entries of `options.headers`.
pub fn headers_from_options(options: &RequestOptions) -> HashMap<String, String> {
    options
        .get("headers")
        .and_then(Value::as_object)
        .map(|h| {
            h.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

impl Host for CliHost {
    fn dispatch_slot(&self) -> Option<&DispatchSlot> {
        self.slot.as_ref()
    }

    fn load_data(&self) -> Result<Option<Value>> {
        self.store.load()
    }

    fn save_data(&self, data: &Value) -> Result<()> {
        self.store.save(data)
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn register_command(&mut self, command: Command) {
        tracing::debug!(
            "registered command {} ({}) with icon {}",
            command.id,
            command.name,
            command.icon
        );
    }

    fn register_settings_panel(&mut self, panel: SettingsPanel) {
        tracing::debug!("registered settings panel with {} controls", panel.controls.len());
    }
}

/// Activated plugin over a settings-only host.
pub fn activate_settings_only(cfg: &GproxyConfig) -> Result<Plugin<CliHost>> {
    let host = CliHost::settings_only(cfg.settings_store()?);
    let mut plugin = Plugin::new(host, cfg.plugin_name.clone(), cfg.defaults.clone());
    plugin.activate()?;
    Ok(plugin)
}
