//! Grouped key/value settings persistence
//!
//! Mirrors the namespaced layout of desktop settings backends: every key
//! lives inside a named group, values are JSON-typed, and writes only reach
//! disk on an explicit [`SettingsStore::flush`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Errors that can occur while loading or flushing settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk settings layout: group name -> key -> value.
///
/// BTreeMaps keep flushed files stably ordered so they diff cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct SettingsDocument {
    groups: BTreeMap<String, BTreeMap<String, Value>>,
}

impl SettingsDocument {
    fn get(&self, group: &str, key: &str) -> Option<&Value> {
        self.groups.get(group).and_then(|entries| entries.get(key))
    }

    fn set(&mut self, group: &str, key: &str, value: Value) {
        self.groups
            .entry(group.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }
}

/// Grouped, JSON-typed key/value store with explicit flushing
pub trait SettingsStore {
    /// Look up a raw value.
    fn get_value(&self, group: &str, key: &str) -> Option<&Value>;

    /// Store a raw value. Only persisted on [`SettingsStore::flush`].
    fn set_value(&mut self, group: &str, key: &str, value: Value);

    /// Write pending changes to the backing store.
    fn flush(&mut self) -> Result<(), SettingsError>;

    /// Typed lookup; `None` when missing or not a boolean.
    fn get_bool(&self, group: &str, key: &str) -> Option<bool> {
        self.get_value(group, key).and_then(Value::as_bool)
    }

    /// Typed lookup; `None` when missing or not an integer.
    fn get_i64(&self, group: &str, key: &str) -> Option<i64> {
        self.get_value(group, key).and_then(Value::as_i64)
    }

    /// Typed lookup; `None` when missing or not a number.
    fn get_f64(&self, group: &str, key: &str) -> Option<f64> {
        self.get_value(group, key).and_then(Value::as_f64)
    }

    /// Typed lookup; `None` when missing or not a string.
    fn get_string(&self, group: &str, key: &str) -> Option<String> {
        self.get_value(group, key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn set_bool(&mut self, group: &str, key: &str, value: bool) {
        self.set_value(group, key, Value::from(value));
    }

    fn set_i64(&mut self, group: &str, key: &str, value: i64) {
        self.set_value(group, key, Value::from(value));
    }

    fn set_f64(&mut self, group: &str, key: &str, value: f64) {
        self.set_value(group, key, Value::from(value));
    }

    fn set_string(&mut self, group: &str, key: &str, value: &str) {
        self.set_value(group, key, Value::from(value));
    }
}

/// File-backed settings store with pretty-printed JSON
pub struct JsonSettingsStore {
    path: PathBuf,
    document: SettingsDocument,
}

impl JsonSettingsStore {
    /// Open a settings file, starting empty when the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let document = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            debug!(path = ?path, "settings file missing, starting empty");
            SettingsDocument::default()
        };
        info!(path = ?path, "opened settings store");
        Ok(Self { path, document })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_value(&self, group: &str, key: &str) -> Option<&Value> {
        self.document.get(group, key)
    }

    fn set_value(&mut self, group: &str, key: &str, value: Value) {
        self.document.set(group, key, value);
    }

    fn flush(&mut self) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, contents)?;
        debug!(path = ?self.path, "flushed settings");
        Ok(())
    }
}

/// In-memory settings store for tests
#[derive(Debug, Default)]
pub struct MemorySettings {
    document: SettingsDocument,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get_value(&self, group: &str, key: &str) -> Option<&Value> {
        self.document.get(group, key)
    }

    fn set_value(&mut self, group: &str, key: &str, value: Value) {
        self.document.set(group, key, value);
    }

    fn flush(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = JsonSettingsStore::open(&path).unwrap();
        store.set_bool("playspaceSettings", "rotateHand", true);
        store.set_i64("display", "width", 1280);
        store.set_f64("display", "scale", 1.5);
        store.set_string("profile", "name", "default");
        store.flush().unwrap();

        let store = JsonSettingsStore::open(&path).unwrap();
        assert_eq!(store.get_bool("playspaceSettings", "rotateHand"), Some(true));
        assert_eq!(store.get_i64("display", "width"), Some(1280));
        assert_eq!(store.get_f64("display", "scale"), Some(1.5));
        assert_eq!(store.get_string("profile", "name"), Some("default".to_owned()));
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.get_bool("playspaceSettings", "rotateHand"), None);
    }

    #[test]
    fn test_unflushed_changes_never_reach_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = JsonSettingsStore::open(&path).unwrap();
        store.set_bool("playspaceSettings", "lockXToggle", true);
        drop(store);

        assert!(!path.exists(), "nothing was flushed, no file expected");
    }

    #[test]
    fn test_typed_lookup_rejects_wrong_type() {
        let mut store = MemorySettings::new();
        store.set_string("group", "key", "not a bool");
        assert_eq!(store.get_bool("group", "key"), None);
        assert_eq!(store.get_string("group", "key"), Some("not a bool".to_owned()));
    }

    #[test]
    fn test_corrupt_file_reports_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        match JsonSettingsStore::open(&path) {
            Err(SettingsError::Json(_)) => {}
            Err(other) => panic!("expected a JSON error, got {other:?}"),
            Ok(_) => panic!("expected a JSON error, file opened fine"),
        }
    }
}
