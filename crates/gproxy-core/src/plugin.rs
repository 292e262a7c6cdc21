//! Plugin lifecycle: activation, user actions and deactivation.
//!
//! `Unloaded -> Loaded -> Unloaded`. Activation merges persisted settings
//! over the defaults it was given, installs the interceptor when the host has
//! a dispatch slot, and registers the toggle command and settings panel.
//!
//! The `enabled` flag is persisted and shown to the user but does not gate
//! rewriting: once installed, the interceptor rewrites until deactivation.

use crate::host::{Command, Host};
use crate::interceptor::{InstalledInterceptor, Interceptor};
use crate::mirror::Mirror;
use crate::resolver::{ActiveMirror, MirrorResolver};
use crate::settings::{Language, Settings, SettingsPanel};

pub const NOTICE_ENABLED: &str = "Community plugin proxy enabled";
pub const NOTICE_DISABLED: &str = "Community plugin proxy disabled";

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("plugin is already loaded")]
    AlreadyLoaded,
    #[error("plugin is not loaded")]
    NotLoaded,
    #[error("failed to load persisted settings: {0:#}")]
    Load(anyhow::Error),
    #[error("invalid persisted settings: {0:#}")]
    Settings(anyhow::Error),
    #[error("failed to persist settings: {0:#}")]
    Persist(anyhow::Error),
}

struct Loaded {
    settings: Settings,
    active_mirror: ActiveMirror,
    interceptor: Option<InstalledInterceptor>,
}

enum PluginState {
    Unloaded,
    Loaded(Loaded),
}

/// The GProxy plugin bound to one host.
pub struct Plugin<H: Host> {
    host: H,
    name: String,
    defaults: Settings,
    state: PluginState,
}

impl<H: Host> Plugin<H> {
    pub fn new(host: H, name: impl Into<String>, defaults: Settings) -> Self {
        Self {
            host,
            name: name.into(),
            defaults,
            state: PluginState::Unloaded,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, PluginState::Loaded(_))
    }

    /// True while the interceptor is installed in the host's dispatch slot.
    pub fn is_intercepting(&self) -> bool {
        matches!(
            &self.state,
            PluginState::Loaded(Loaded {
                interceptor: Some(_),
                ..
            })
        )
    }

    pub fn settings(&self) -> Option<&Settings> {
        match &self.state {
            PluginState::Loaded(loaded) => Some(&loaded.settings),
            PluginState::Unloaded => None,
        }
    }

    pub fn activate(&mut self) -> Result<(), PluginError> {
        if self.is_loaded() {
            return Err(PluginError::AlreadyLoaded);
        }

        let persisted = self.host.load_data().map_err(PluginError::Load)?;
        let settings =
            Settings::merged(&self.defaults, persisted.as_ref()).map_err(PluginError::Settings)?;
        tracing::debug!("activating {} with {:?}", self.name, settings);

        let active_mirror = ActiveMirror::new(settings.mirror_server);
        let interceptor = match self.host.dispatch_slot() {
            Some(slot) => Some(Interceptor::install(
                slot,
                MirrorResolver::new(active_mirror.clone()),
                &self.name,
            )),
            None => {
                tracing::info!(
                    "[{}] host exposes no request dispatch; interception skipped",
                    self.name
                );
                None
            }
        };

        self.host.register_command(Command::toggle());
        self.host
            .register_settings_panel(SettingsPanel::for_settings(&settings));

        self.state = PluginState::Loaded(Loaded {
            settings,
            active_mirror,
            interceptor,
        });
        Ok(())
    }

    /// Flips `enabled`, persists it and notifies the user. Returns the new value.
    pub fn toggle(&mut self) -> Result<bool, PluginError> {
        let enabled = self.update(|s| s.enabled = !s.enabled)?.enabled;
        self.host.notify(if enabled {
            NOTICE_ENABLED
        } else {
            NOTICE_DISABLED
        });
        Ok(enabled)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), PluginError> {
        self.update(|s| s.enabled = enabled).map(|_| ())
    }

    /// Selects a mirror. The installed interceptor uses it from the next request on.
    pub fn set_mirror(&mut self, mirror: Mirror) -> Result<(), PluginError> {
        self.update(|s| s.mirror_server = mirror)?;
        tracing::info!("[{}] mirror set to {}", self.name, mirror);
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), PluginError> {
        self.update(|s| s.language = language).map(|_| ())
    }

    /// Uninstalls the interceptor (if installed) and unloads. No-op when unloaded.
    pub fn deactivate(&mut self) {
        let PluginState::Loaded(loaded) = std::mem::replace(&mut self.state, PluginState::Unloaded)
        else {
            return;
        };
        if let Some(installed) = loaded.interceptor {
            match self.host.dispatch_slot() {
                Some(slot) => installed.uninstall(slot),
                None => tracing::warn!(
                    "[{}] dispatch slot disappeared before uninstall",
                    self.name
                ),
            }
        }
    }

    /// Deactivates and hands the host back.
    pub fn into_host(mut self) -> H {
        self.deactivate();
        self.host
    }

    /// Applies `change` and saves immediately. In-memory settings and the
    /// active mirror are only updated once the save succeeded.
    fn update(&mut self, change: impl FnOnce(&mut Settings)) -> Result<Settings, PluginError> {
        let PluginState::Loaded(loaded) = &mut self.state else {
            return Err(PluginError::NotLoaded);
        };
        let mut next = loaded.settings.clone();
        change(&mut next);
        let value = next.to_value().map_err(PluginError::Persist)?;
        self.host.save_data(&value).map_err(PluginError::Persist)?;
        loaded.active_mirror.set(next.mirror_server);
        loaded.settings = next.clone();
        Ok(next)
    }
}
