//! Settings persistence

pub mod settings;

pub use settings::{JsonSettingsStore, MemorySettings, SettingsError, SettingsStore};
