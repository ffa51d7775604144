//! Animation speed presets.

use serde::{Deserialize, Serialize};

/// Global animation speed selected in the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to snowflake fall and drift velocities.
    pub fn snow_fall_speed(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.6,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.6,
        }
    }

    /// Multiplier applied to the liquid surface clock.
    pub fn liquid_flow_speed(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.8,
        }
    }
}
