//! Host backed by a JSON settings file and a recording dispatch function.

use gproxy_core::host::{Command, Host};
use gproxy_core::interceptor::{Dispatch, DispatchSlot, RequestOptions};
use gproxy_core::settings::{JsonFileStore, SettingsPanel};
use serde_json::Value;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

pub type Sent = Rc<RefCell<Vec<(String, RequestOptions)>>>;

pub struct FileHost {
    pub store: JsonFileStore,
    pub slot: Option<DispatchSlot>,
    pub notices: RefCell<Vec<String>>,
    pub commands: Vec<Command>,
    pub panels: Vec<SettingsPanel>,
}

impl FileHost {
    /// Host with a dispatch slot whose original function records every call.
    pub fn with_dispatch(path: &Path) -> (Self, Sent) {
        let sent: Sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        let original: Dispatch = Rc::new(
            move |channel: &str, _salt: &str, options: RequestOptions, _rest: &[Value]| -> anyhow::Result<()> {
                sink.borrow_mut().push((channel.to_string(), options));
                Ok(())
            },
        );
        let host = Self {
            store: JsonFileStore::new(path),
            slot: Some(DispatchSlot::new(original)),
            notices: RefCell::new(Vec::new()),
            commands: Vec::new(),
            panels: Vec::new(),
        };
        (host, sent)
    }
}

impl Host for FileHost {
    fn dispatch_slot(&self) -> Option<&DispatchSlot> {
        self.slot.as_ref()
    }

    fn load_data(&self) -> anyhow::Result<Option<Value>> {
        self.store.load()
    }

    fn save_data(&self, data: &Value) -> anyhow::Result<()> {
        self.store.save(data)
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn register_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    fn register_settings_panel(&mut self, panel: SettingsPanel) {
        self.panels.push(panel);
    }
}
