//! Shaded liquid surface.
//!
//! The surface is a height field built from overlapping sine waves. Its
//! slope displaces texture lookups and feeds a simple diffuse plus specular
//! lighting pass, which gives the rolling metallic look.

use flurry_core::AnimationSpeed;
use tracing::debug;

use crate::backdrop::ShaderPlane;
use crate::color::{Rgb, hsl_to_rgb};
use crate::surface::Surface;
use crate::texture::Texture;

/// Number of rain drops alive at once when rain is on.
const RAIN_DROPS: usize = 6;
/// Seconds a rain ripple lasts.
const RAIN_PERIOD: f32 = 2.0;
/// How far one unit of slope moves a texture lookup, per unit of
/// displacement scale.
const DISPLACEMENT_REACH: f32 = 0.001;

/// Surface material settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidMaterial {
    /// 0 is dielectric, 1 fully metallic. Tints highlights with the base color.
    pub metalness: f32,
    /// 0 is mirror-like, 1 fully diffuse. Controls highlight sharpness.
    pub roughness: f32,
    /// Height field amplitude.
    pub displacement_scale: f32,
    /// Overlay expanding ripples.
    pub rain: bool,
}

impl Default for LiquidMaterial {
    fn default() -> Self {
        Self {
            metalness: 0.75,
            roughness: 0.25,
            displacement_scale: 5.0,
            rain: false,
        }
    }
}

impl LiquidMaterial {
    /// Specular exponent for the Blinn-Phong highlight.
    pub fn shininess(&self) -> f32 {
        let r = self.roughness.clamp(0.05, 1.0);
        (2.0 / (r * r) - 2.0).max(1.0)
    }
}

/// Animated liquid plane. Starts paused and hidden.
#[derive(Debug, Clone)]
pub struct LiquidPlane {
    material: LiquidMaterial,
    flow_speed: f32,
    time: f32,
    paused: bool,
    visible: bool,
    width: u16,
    height: u16,
    texture: Option<Texture>,
}

impl LiquidPlane {
    pub fn new(material: LiquidMaterial, speed: AnimationSpeed) -> Self {
        Self {
            material,
            flow_speed: speed.liquid_flow_speed(),
            time: 0.0,
            paused: true,
            visible: false,
            width: 0,
            height: 0,
            texture: None,
        }
    }

    pub fn material(&self) -> &LiquidMaterial {
        &self.material
    }

    pub fn set_material(&mut self, material: LiquidMaterial) {
        self.material = material;
    }

    /// Animation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Advance the flow. A paused plane keeps its time.
    pub fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.time += dt.max(0.0) * self.flow_speed;
    }

    /// Height at normalized `(x, y)`, roughly within `[-scale, scale]`.
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        let t = self.time;
        let x = x * 6.0;
        let y = y * 6.0;
        let mut h = (x * 1.5 + t).sin()
            + (y * 1.8 + t * 0.8).sin()
            + ((x + y) * 1.2 + t * 0.6).sin()
            + ((x * x + y * y).sqrt() * 2.0 - t * 1.2).sin();
        h /= 4.0;

        if self.material.rain {
            h += self.rain_at(x / 6.0, y / 6.0);
        }
        h * self.material.displacement_scale
    }

    fn rain_at(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        for drop in 0..RAIN_DROPS {
            let offset = drop as f32 / RAIN_DROPS as f32;
            let cycle = self.time / RAIN_PERIOD + offset;
            let generation = cycle.floor();
            let age = cycle.fract() * RAIN_PERIOD;

            let seed = drop as f32 * 17.0 + generation * 131.0;
            let cx = hash(seed);
            let cy = hash(seed + 7.3);
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();

            total += (dist * 60.0 - age * 12.0).sin() * (-age * 2.0).exp() * (-dist * 8.0).exp();
        }
        total * 0.5
    }

    /// Draw the plane over the whole surface. A hidden plane draws nothing.
    pub fn render(&self, surface: &mut Surface) {
        if !self.visible {
            return;
        }

        let width = surface.width();
        let height = surface.height();
        if width == 0 || height == 0 {
            return;
        }
        let span_x = f32::from(if self.width > 0 { self.width } else { width });
        let span_y = f32::from(if self.height > 0 { self.height } else { height });

        let light = normalize((-0.4, -0.6, 0.7));
        let view = (0.0, 0.0, 1.0);
        let half = normalize((light.0 + view.0, light.1 + view.1, light.2 + view.2));
        let shininess = self.material.shininess();
        let metalness = self.material.metalness.clamp(0.0, 1.0);
        let eps = 1.0 / span_x.max(span_y);

        for py in 0..height {
            for px in 0..width {
                let u = (px as f32 + 0.5) / span_x;
                let v = (py as f32 + 0.5) / span_y;

                let h = self.height_at(u, v);
                let dhdx = (self.height_at(u + eps, v) - h) / eps;
                let dhdy = (self.height_at(u, v + eps) - h) / eps;
                let normal = normalize((-dhdx * eps, -dhdy * eps, 1.0));

                let base = self.base_color(u, v, dhdx, dhdy, h);

                let diffuse = dot(normal, light).max(0.0);
                let specular = dot(normal, half).max(0.0).powf(shininess);
                let highlight = Rgb::WHITE.lerp(base, metalness);

                let ambient = 0.35;
                let shaded = base
                    .scale(ambient + diffuse * (1.0 - metalness * 0.5))
                    .add(highlight.scale(specular));
                surface.set_pixel(px as i32, py as i32, shaded, 1.0);
            }
        }
    }

    fn base_color(&self, u: f32, v: f32, dhdx: f32, dhdy: f32, h: f32) -> Rgb {
        let reach = DISPLACEMENT_REACH * self.material.displacement_scale.max(0.0);
        match &self.texture {
            Some(texture) => texture.sample(u + dhdx * reach, v + dhdy * reach),
            None => {
                let scale = self.material.displacement_scale.abs().max(f32::EPSILON);
                let level = (h / scale).clamp(-1.0, 1.0);
                hsl_to_rgb(200.0 + level * 25.0, 0.45, 0.35 + level * 0.12)
            }
        }
    }
}

impl ShaderPlane for LiquidPlane {
    fn enable(&mut self) {
        self.paused = false;
        self.visible = true;
    }

    fn disable(&mut self) {
        self.paused = true;
        self.visible = false;
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn load_texture(&mut self, texture: Texture) {
        debug!(
            width = texture.width(),
            height = texture.height(),
            "liquid plane texture set"
        );
        self.texture = Some(texture);
    }
}

fn hash(n: f32) -> f32 {
    ((n.sin() * 43_758.547).fract()).abs()
}

fn dot(a: (f32, f32, f32), b: (f32, f32, f32)) -> f32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

fn normalize(v: (f32, f32, f32)) -> (f32, f32, f32) {
    let len = dot(v, v).sqrt();
    if len <= f32::EPSILON {
        return (0.0, 0.0, 1.0);
    }
    (v.0 / len, v.1 / len, v.2 / len)
}
