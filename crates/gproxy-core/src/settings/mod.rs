//! User settings: model, merge-over-defaults, persistence and the settings
//! panel description.

mod panel;
mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mirror::Mirror;

pub use panel::{Control, SettingsPanel};
pub use store::JsonFileStore;

/// Display language. Offered in the settings panel but not yet switchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ZH-CN")]
    ZhCn,
    #[serde(rename = "EN")]
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::ZhCn, Language::En];

    pub fn id(self) -> &'static str {
        match self {
            Language::ZhCn => "ZH-CN",
            Language::En => "EN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::ZhCn => "简体中文",
            Language::En => "English",
        }
    }
}

/// Persisted plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub enabled: bool,
    pub mirror_server: Mirror,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            mirror_server: Mirror::Fastgit,
            language: Language::ZhCn,
            plugin_name: None,
        }
    }
}

impl Settings {
    /// Overlays `persisted` on `defaults` key by key.
    ///
    /// Persisted keys win, missing or `null` keys keep their default. A persisted value
    /// of the wrong shape (e.g. an unknown `mirrorServer`) is an error rather
    /// than a silent fallback.
    pub fn merged(defaults: &Settings, persisted: Option<&Value>) -> anyhow::Result<Settings> {
        let mut base = match serde_json::to_value(defaults)? {
            Value::Object(map) => map,
            other => anyhow::bail!("settings serialized to a non-object: {}", other),
        };
        match persisted {
            None | Some(Value::Null) => {}
            Some(Value::Object(overlay)) => {
                for (key, value) in overlay.iter().filter(|(_, v)| !v.is_null()) {
                    base.insert(key.clone(), value.clone());
                }
            }
            Some(other) => {
                anyhow::bail!("persisted settings must be a JSON object, got {}", other)
            }
        }
        let settings = serde_json::from_value(Value::Object(base))?;
        Ok(settings)
    }

    pub fn to_value(&self) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
