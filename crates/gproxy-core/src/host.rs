//! Host collaborator: what the embedding application provides to the plugin.

use anyhow::Result;
use serde_json::Value;

use crate::interceptor::DispatchSlot;
use crate::settings::SettingsPanel;

/// User-invocable command registered with the host (palette entry and icon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Id of the enable/disable command.
pub const TOGGLE_COMMAND_ID: &str = "gproxy-toggle";

impl Command {
    pub const fn toggle() -> Self {
        Self {
            id: TOGGLE_COMMAND_ID,
            name: "Toggle community plugin proxy",
            icon: "cherry",
        }
    }
}

/// Services the host exposes to the plugin.
pub trait Host {
    /// The host's outbound request dispatch slot, or `None` when this host
    /// cannot be intercepted. Interception is skipped in that case.
    fn dispatch_slot(&self) -> Option<&DispatchSlot>;

    /// Loads the plugin's persisted data; `None` if nothing was saved yet.
    fn load_data(&self) -> Result<Option<Value>>;

    /// Replaces the plugin's persisted data.
    fn save_data(&self, data: &Value) -> Result<()>;

    /// Shows a transient message to the user.
    fn notify(&self, message: &str);

    fn register_command(&mut self, command: Command);

    fn register_settings_panel(&mut self, panel: SettingsPanel);
}
