//! Single-string preferences that survive restarts.
//!
//! Every failure here is recoverable: callers log it and fall back to the
//! documented default.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use flurry_core::Theme;
use tracing::{debug, warn};

use crate::error::PreferenceError;

/// Key holding the selected [`Theme`].
pub const THEME_KEY: &str = "flurry-theme";

/// Key holding the standalone snow toggle (`"enabled"` / `"disabled"`).
pub const SNOW_KEY: &str = "flurry-snow";

/// String key/value storage for preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept in a small TOML table on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/preferences.toml`, if a data directory exists.
    pub fn in_data_dir() -> Option<Self> {
        crate::data_dir().map(|dir| Self::new(dir.join("preferences.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&values)?)?;
        Ok(())
    }
}

/// In-memory preferences, used when no data directory exists and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read and write fails.
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if self.unavailable {
            return Err(PreferenceError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.unavailable {
            return Err(PreferenceError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the stored theme. Absent, invalid or unreadable values give
/// [`Theme::Off`].
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|err| {
            warn!(%err, "ignoring stored theme");
            Theme::Off
        }),
        Ok(None) => Theme::Off,
        Err(err) => {
            warn!(%err, "could not load theme preference");
            Theme::Off
        }
    }
}

/// Persist the theme, logging failures.
pub fn save_theme(store: &mut dyn PreferenceStore, theme: Theme) {
    match store.set(THEME_KEY, theme.as_str()) {
        Ok(()) => debug!(%theme, "saved theme preference"),
        Err(err) => warn!(%err, "could not save theme preference"),
    }
}

/// Read the standalone snow flag. Anything but `"disabled"` means enabled.
pub fn load_snow_enabled(store: &dyn PreferenceStore) -> bool {
    match store.get(SNOW_KEY) {
        Ok(value) => value.as_deref() != Some("disabled"),
        Err(err) => {
            warn!(%err, "could not load snow preference");
            true
        }
    }
}

/// Persist the standalone snow flag, logging failures.
pub fn save_snow_enabled(store: &mut dyn PreferenceStore, enabled: bool) {
    let value = if enabled { "enabled" } else { "disabled" };
    if let Err(err) = store.set(SNOW_KEY, value) {
        warn!(%err, "could not save snow preference");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults_to_off() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(load_theme(&store), Theme::Off);
    }

    #[test]
    fn test_invalid_theme_defaults_to_off() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "plasma").unwrap();
        assert_eq!(load_theme(&store), Theme::Off);
    }

    #[test]
    fn test_theme_round_trip() {
        let mut store = MemoryPreferenceStore::new();
        save_theme(&mut store, Theme::Liquid);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("liquid"));
        assert_eq!(load_theme(&store), Theme::Liquid);
    }

    #[test]
    fn test_unavailable_store_falls_back() {
        let mut store = MemoryPreferenceStore::unavailable();
        save_theme(&mut store, Theme::Snow);
        save_snow_enabled(&mut store, false);
        assert_eq!(load_theme(&store), Theme::Off);
        assert!(load_snow_enabled(&store));
    }

    #[test]
    fn test_snow_flag() {
        let mut store = MemoryPreferenceStore::new();
        assert!(load_snow_enabled(&store));
        save_snow_enabled(&mut store, false);
        assert!(!load_snow_enabled(&store));
        save_snow_enabled(&mut store, true);
        assert!(load_snow_enabled(&store));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = FilePreferenceStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "snow").unwrap();
        store.set(SNOW_KEY, "disabled").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(load_theme(&reopened), Theme::Snow);
        assert!(!load_snow_enabled(&reopened));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let mut store = FilePreferenceStore::new(&path);
        assert!(store.get(THEME_KEY).is_err());
        assert_eq!(load_theme(&store), Theme::Off);

        store.set(THEME_KEY, "liquid").unwrap();
        assert_eq!(load_theme(&store), Theme::Liquid);
    }
}
