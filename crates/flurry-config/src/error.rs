//! Error types for configuration and preference storage.

use std::fmt;
use std::io;

/// Failure to read or parse the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config read error: {err}"),
            Self::Parse(err) => write!(f, "config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

/// Failure to read or write a stored preference.
#[derive(Debug)]
pub enum PreferenceError {
    /// Storage cannot be used at all (no home directory, disabled store).
    Unavailable,
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("preference storage unavailable"),
            Self::Io(err) => write!(f, "preference io error: {err}"),
            Self::Parse(err) => write!(f, "preference parse error: {err}"),
            Self::Serialize(err) => write!(f, "preference encode error: {err}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<io::Error> for PreferenceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for PreferenceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<toml::ser::Error> for PreferenceError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialize(err)
    }
}
