//! Theme selection and the status icon that reflects it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mutually exclusive background mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// No animated background.
    #[default]
    #[serde(rename = "none", alias = "off")]
    Off,
    /// Falling snow that settles on the label.
    Snow,
    /// Shaded liquid surface.
    Liquid,
}

impl Theme {
    /// All themes in cycling order.
    pub const ALL: [Theme; 3] = [Theme::Off, Theme::Snow, Theme::Liquid];

    /// Cycle to the next theme (off, snow, liquid, then back to off).
    pub fn next(self) -> Self {
        match self {
            Theme::Off => Theme::Snow,
            Theme::Snow => Theme::Liquid,
            Theme::Liquid => Theme::Off,
        }
    }

    /// Value written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Off => "none",
            Theme::Snow => "snow",
            Theme::Liquid => "liquid",
        }
    }

    /// Whether this theme runs an animation.
    pub fn is_animated(self) -> bool {
        self != Theme::Off
    }

    /// Status icon for this theme.
    pub fn icon(self) -> StatusIcon {
        match self {
            Theme::Off => StatusIcon::Sun,
            Theme::Snow => StatusIcon::Snowflake,
            Theme::Liquid => StatusIcon::Droplet,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored theme string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {:?}", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" | "off" => Ok(Theme::Off),
            "snow" => Ok(Theme::Snow),
            "liquid" => Ok(Theme::Liquid),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Icon shown in the status line for the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Sun,
    Snowflake,
    Droplet,
}

impl StatusIcon {
    /// Single-width glyph for the icon.
    pub fn glyph(self) -> char {
        match self {
            StatusIcon::Sun => '☼',
            StatusIcon::Snowflake => '❄',
            StatusIcon::Droplet => '◆',
        }
    }

    /// Tooltip-style title describing the current state and the next one.
    pub fn title(self) -> &'static str {
        match self {
            StatusIcon::Sun => "No theme (next: snow)",
            StatusIcon::Snowflake => "Snow theme (next: liquid)",
            StatusIcon::Droplet => "Liquid theme (next: off)",
        }
    }
}
