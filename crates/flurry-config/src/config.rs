//! The `config.toml` file.

use std::fs;
use std::path::Path;

use flurry_core::{AnimationSpeed, SurfaceLayout};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Label drawn behind the snow when none is configured.
pub const DEFAULT_LABEL: &str = "FLURRY";

/// Texture loaded by the liquid surface when none is configured.
pub const DEFAULT_TEXTURE: &str = "https://assets.codepen.io/33787/liquid.webp";

/// Upper bound on the configurable particle pool.
const MAX_PARTICLES: usize = 5000;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text snow settles on.
    pub label: String,
    /// Region covered by the snow surface.
    pub layout: SurfaceLayout,
    /// Global animation speed.
    pub speed: AnimationSpeed,
    /// Number of particles in the snow pool.
    pub particle_count: usize,
    /// Chance that a flake touching the label sticks to it.
    pub stick_probability: f32,
    /// Skip animated themes at startup.
    pub reduced_motion: bool,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Fixed random seed, mostly for reproducible recordings.
    pub seed: Option<u64>,
    /// Liquid surface settings.
    pub liquid: LiquidConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            layout: SurfaceLayout::default(),
            speed: AnimationSpeed::default(),
            particle_count: 150,
            stick_probability: 0.7,
            reduced_motion: false,
            frame_rate: 60,
            seed: None,
            liquid: LiquidConfig::default(),
        }
    }
}

/// Material and texture settings for the liquid surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidConfig {
    /// URL (`http://`, `https://`) or file path of the surface texture.
    pub texture: String,
    pub metalness: f32,
    pub roughness: f32,
    pub displacement_scale: f32,
    /// Draw rain ripples on the surface.
    pub rain: bool,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            texture: DEFAULT_TEXTURE.to_string(),
            metalness: 0.75,
            roughness: 0.25,
            displacement_scale: 5.0,
            rain: false,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// logged and also yields the defaults.
    pub fn load() -> Self {
        let Some(path) = crate::config_path() else {
            debug!("no config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Load and sanitize the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and sanitize configuration text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        Ok(config.sanitized())
    }

    /// Clamp numeric settings into their usable ranges.
    pub fn sanitized(mut self) -> Self {
        self.particle_count = self.particle_count.min(MAX_PARTICLES);
        let defaults = Self::default();
        self.stick_probability =
            finite_or(self.stick_probability, defaults.stick_probability).clamp(0.0, 1.0);
        self.frame_rate = self.frame_rate.clamp(1, 240);
        if self.label.trim().is_empty() {
            self.label = DEFAULT_LABEL.to_string();
        }
        let liquid = &defaults.liquid;
        self.liquid.metalness = finite_or(self.liquid.metalness, liquid.metalness).clamp(0.0, 1.0);
        self.liquid.roughness = finite_or(self.liquid.roughness, liquid.roughness).clamp(0.0, 1.0);
        self.liquid.displacement_scale =
            finite_or(self.liquid.displacement_scale, liquid.displacement_scale).max(0.0);
        self
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
            label = "Konvo"
            layout = "logo"
            speed = "fast"

            [liquid]
            rain = true
            "#,
        )
        .unwrap();
        assert_eq!(config.label, "Konvo");
        assert_eq!(config.layout, SurfaceLayout::Logo);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert!(config.liquid.rain);
        assert_eq!(config.liquid.metalness, 0.75);
        assert_eq!(config.particle_count, 150);
    }

    #[test]
    fn test_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            label = "   "
            particle_count = 1000000
            stick_probability = 3.5
            frame_rate = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.particle_count, MAX_PARTICLES);
        assert_eq!(config.stick_probability, 1.0);
        assert_eq!(config.frame_rate, 1);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            stick_probability = nan

            [liquid]
            metalness = nan
            roughness = inf
            displacement_scale = -inf
            "#,
        )
        .unwrap();
        let defaults = Config::default();
        assert_eq!(config.stick_probability, defaults.stick_probability);
        assert_eq!(config.liquid.metalness, defaults.liquid.metalness);
        assert_eq!(config.liquid.roughness, defaults.liquid.roughness);
        assert_eq!(
            config.liquid.displacement_scale,
            defaults.liquid.displacement_scale
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("layout = 42"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
