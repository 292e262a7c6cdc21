//! Persist settings as a single JSON document (wholesale load/save).

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON file holding the plugin's persisted data.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default path: `~/.local/share/gproxy/data.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("gproxy")?;
        Ok(xdg_dirs.get_data_home().join("data.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored document. A missing file yields `None`.
    pub fn load(&self) -> Result<Option<Value>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read settings: {}", self.path.display()))
            }
        };
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse settings: {}", self.path.display()))?;
        Ok(Some(value))
    }

    /// Replaces the stored document (creates the parent dir if needed).
    pub fn save(&self, data: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(data).context("serialize settings")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write settings: {}", self.path.display()))?;
        tracing::debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_and_load_reads_back() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data.json"));
        let data = json!({ "enabled": true, "mirrorServer": "mtr", "language": "ZH-CN" });
        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap(), Some(data));
    }

    #[test]
    fn last_write_wins() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.save(&json!({ "enabled": true })).unwrap();
        store.save(&json!({ "enabled": false })).unwrap();
        assert_eq!(store.load().unwrap(), Some(json!({ "enabled": false })));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("parse settings"));
    }
}
