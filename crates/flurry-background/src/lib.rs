//! Background animation engine for flurry.
//!
//! This crate provides the pixel [`Surface`] the animations draw into, the
//! [`TextMask`] snow collides with, the snow [`ParticleField`], the shaded
//! [`LiquidPlane`], the [`RenderLoop`] that drives frames, and the
//! [`BackdropController`] that owns the liquid plane's asynchronous setup.

mod animations;
mod backdrop;
mod color;
mod debounce;
mod driver;
mod mask;
mod surface;
mod texture;

pub use animations::liquid::{LiquidMaterial, LiquidPlane};
pub use animations::snow::{
    FieldConfig, MIN_DRAW_RADIUS, Particle, ParticleField, ParticleState, Spawn,
    VIEWPORT_PIXEL_SCALE,
};
pub use backdrop::{BackdropController, InitStatus, ShaderPlane, TextureSource};
pub use color::{Rgb, hsl_to_rgb};
pub use debounce::{Debouncer, RESIZE_DEBOUNCE};
pub use driver::{FrameScheduler, FrameToken, LoopState, RenderLoop, Scene, SnowScene, TickScheduler};
pub use mask::{ALPHA_THRESHOLD, TextMask};
pub use surface::{Pixel, Surface};
pub use texture::{Texture, TextureError};
