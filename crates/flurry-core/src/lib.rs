//! Core types shared across the flurry crates.
//!
//! Holds the theme enumeration and its status icon, the animation speed
//! presets, viewport tiers used for responsive sizing, and the [`Effect`]
//! trait every switchable background implements.

mod effect;
mod layout;
mod speed;
mod theme;

pub use effect::Effect;
pub use layout::{SurfaceLayout, ViewportTier, BREAKPOINT_COLUMNS};
pub use speed::AnimationSpeed;
pub use theme::{ParseThemeError, StatusIcon, Theme};
