//! Declarative description of the settings panel a host renders.

use crate::mirror::Mirror;

use super::{Language, Settings};

/// One control in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Toggle {
        key: &'static str,
        name: &'static str,
        description: &'static str,
        value: bool,
    },
    Dropdown {
        key: &'static str,
        name: &'static str,
        description: &'static str,
        /// `(value, label)` pairs in display order.
        options: Vec<(&'static str, &'static str)>,
        selected: &'static str,
        disabled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub title: &'static str,
    pub description: &'static str,
    pub controls: Vec<Control>,
}

impl SettingsPanel {
    /// Builds the panel for the given settings. Mirror choices come from
    /// [`Mirror::ALL`].
    pub fn for_settings(settings: &Settings) -> Self {
        let mirror_options = Mirror::ALL.iter().map(|m| (m.id(), m.id())).collect();
        let language_options = Language::ALL.iter().map(|l| (l.id(), l.label())).collect();

        Self {
            title: "GProxy",
            description: "Download community plugins from GitHub mirror sites \
                          when GitHub itself is unreachable.",
            controls: vec![
                Control::Toggle {
                    key: "enabled",
                    name: "Enable GProxy",
                    description: "Route community plugin downloads through the selected mirror.",
                    value: settings.enabled,
                },
                Control::Dropdown {
                    key: "mirrorServer",
                    name: "Mirror",
                    description: "",
                    options: mirror_options,
                    selected: settings.mirror_server.id(),
                    disabled: false,
                },
                Control::Dropdown {
                    key: "language",
                    name: "Language",
                    description: "Choose your favor language.",
                    options: language_options,
                    selected: settings.language.id(),
                    disabled: true,
                },
            ],
        }
    }

    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|c| match c {
            Control::Toggle { key: k, .. } | Control::Dropdown { key: k, .. } => *k == key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_offered_mirror_has_a_table_entry() {
        let panel = SettingsPanel::for_settings(&Settings::default());
        match panel.control("mirrorServer") {
            Some(Control::Dropdown { options, selected, .. }) => {
                assert_eq!(options.len(), Mirror::ALL.len());
                for (value, _) in options {
                    assert!(crate::mirror::lookup(value).is_ok(), "{value}");
                }
                assert_eq!(*selected, "fastgit");
            }
            other => panic!("expected mirror dropdown, got {other:?}"),
        }
    }

    #[test]
    fn language_dropdown_is_disabled() {
        let panel = SettingsPanel::for_settings(&Settings::default());
        match panel.control("language") {
            Some(Control::Dropdown { disabled, selected, .. }) => {
                assert!(*disabled);
                assert_eq!(*selected, "ZH-CN");
            }
            other => panic!("expected language dropdown, got {other:?}"),
        }
    }

    #[test]
    fn toggle_reflects_enabled_flag() {
        let settings = Settings {
            enabled: true,
            ..Settings::default()
        };
        let panel = SettingsPanel::for_settings(&settings);
        assert!(matches!(
            panel.control("enabled"),
            Some(Control::Toggle { value: true, .. })
        ));
        assert!(panel.control("missing").is_none());
    }
}
