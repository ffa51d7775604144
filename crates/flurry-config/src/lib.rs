//! Configuration file and persisted preferences for flurry.

mod config;
mod error;
mod preferences;

pub use config::{Config, LiquidConfig, DEFAULT_LABEL, DEFAULT_TEXTURE};
pub use error::{ConfigError, PreferenceError};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, SNOW_KEY, THEME_KEY,
    load_snow_enabled, load_theme, save_snow_enabled, save_theme,
};

use std::path::PathBuf;

use directories::ProjectDirs;

/// Project directories for flurry, if the platform provides a home.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "flurry", "flurry")
}

/// Default location of `config.toml`.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory holding preferences and the log file.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
