//! Snowfall particle field (stateful).
//!
//! A fixed pool of flakes falls through the surface. Flakes that land on an
//! opaque pixel of the [`TextMask`] may stick, fade out and are then
//! recycled above the top edge. Nothing is ever allocated after
//! initialization.

use rand::Rng;

use crate::color::Rgb;
use crate::mask::TextMask;
use crate::surface::Surface;

/// Smallest radius ever drawn.
pub const MIN_DRAW_RADIUS: f32 = 0.5;

/// Velocities are expressed per tick of a 60 Hz clock.
const TICKS_PER_SECOND: f32 = 60.0;

/// Longest step taken in one advance, so a stalled frame does not teleport
/// flakes through the label.
const MAX_TICKS_PER_ADVANCE: f32 = 4.0;

/// Terminal pixels per browser pixel for the viewport preset. One terminal
/// pixel is half a cell, taken as four browser pixels.
pub const VIEWPORT_PIXEL_SCALE: f32 = 0.25;

/// Seconds a full-speed flake takes to cross the logo region.
const LOGO_FALL_SECONDS: f32 = 3.0;

/// Sideways travel over a full-speed fall, in pixels of a region
/// [`LOGO_REFERENCE_WIDTH`] wide.
const LOGO_DRIFT: f32 = 30.0;
const LOGO_REFERENCE_WIDTH: f32 = 200.0;

/// Lifecycle of a single flake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    /// Moving under its own velocity.
    Falling,
    /// Landed on the label this tick; position frozen.
    Stuck,
    /// Frozen and losing opacity until it is recycled.
    Fading,
}

/// Where a flake is placed vertically when spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    /// Anywhere over the full height, for immediate density.
    Scattered,
    /// Just above the top edge, so it falls in.
    Above,
}

/// State for a single snowflake.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius before depth scaling.
    pub size: f32,
    /// Vertical pixels per tick.
    pub speed: f32,
    /// Horizontal pixels per tick (wind).
    pub drift: f32,
    /// Accumulated wobble phase in radians.
    pub wobble_phase: f32,
    /// Radians added to the wobble phase per tick.
    pub wobble_rate: f32,
    pub opacity: f32,
    /// Opacity lost per tick while fading.
    pub fade_rate: f32,
    pub state: ParticleState,
}

/// Tuning for a particle field.
///
/// Ranges are `(min, max)`; a degenerate range always yields `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub size: (f32, f32),
    pub speed: (f32, f32),
    pub drift: (f32, f32),
    pub opacity: (f32, f32),
    pub wobble_rate: (f32, f32),
    /// Peak horizontal wobble in pixels per tick.
    pub wobble_amplitude: f32,
    /// Chance a flake touching the label sticks.
    pub stick_probability: f32,
    /// Seconds a stuck flake takes to fade out.
    pub fade_seconds: (f32, f32),
    /// Distance beyond the edges a flake may travel before it is recycled
    /// or wrapped.
    pub margin: f32,
    /// Multiplier applied to opacity when drawing.
    pub alpha_scale: f32,
    /// Radius multiplier at the top edge.
    pub depth_top: f32,
    /// Radius multiplier at the bottom edge.
    pub depth_bottom: f32,
    /// Whether flakes test the label mask at all.
    pub collides: bool,
    pub initial_spawn: Spawn,
    /// Placement of flakes recycled after fading.
    pub recycle_spawn: Spawn,
    pub color: Rgb,
}

impl FieldConfig {
    /// Small logo region where flakes settle on the label.
    ///
    /// Flakes cross the region in about three seconds at full speed and
    /// drift up to 30 px of a 200 px wide region over that fall, scaled to
    /// `width`. They shrink towards the bottom.
    pub fn logo(width: u16, height: u16) -> Self {
        let margin = 5.0;
        let fall_ticks = LOGO_FALL_SECONDS * TICKS_PER_SECOND;
        let full_speed = (height as f32 + 2.0 * margin) / fall_ticks;
        let drift = LOGO_DRIFT * width as f32 / LOGO_REFERENCE_WIDTH / fall_ticks;
        Self {
            count: 150,
            size: (0.5, 2.5),
            speed: (0.3 * full_speed, full_speed),
            drift: (-drift, drift),
            opacity: (1.0, 1.0),
            wobble_rate: (0.02, 0.06),
            wobble_amplitude: 0.08,
            stick_probability: 0.7,
            fade_seconds: (2.0, 5.0),
            margin,
            alpha_scale: 0.8,
            depth_top: 1.0,
            depth_bottom: 0.3,
            collides: true,
            initial_spawn: Spawn::Scattered,
            recycle_spawn: Spawn::Above,
            color: Rgb::WHITE,
        }
    }

    /// Full-viewport snowfall with steady wind, no depth falloff and no
    /// collision with the label.
    ///
    /// Radius 1..4, speed 0.5..2 per tick, wind ±0.5 per tick and a margin
    /// of 10, each multiplied by [`VIEWPORT_PIXEL_SCALE`].
    pub fn viewport() -> Self {
        let scale = VIEWPORT_PIXEL_SCALE;
        Self {
            count: 150,
            size: (scale, 4.0 * scale),
            speed: (0.5 * scale, 2.0 * scale),
            drift: (-0.5 * scale, 0.5 * scale),
            opacity: (0.3, 1.0),
            wobble_rate: (0.0, 0.0),
            wobble_amplitude: 0.0,
            stick_probability: 0.7,
            fade_seconds: (2.0, 5.0),
            margin: 10.0 * scale,
            alpha_scale: 1.0,
            depth_top: 1.0,
            depth_bottom: 1.0,
            collides: false,
            initial_spawn: Spawn::Scattered,
            recycle_spawn: Spawn::Above,
            color: Rgb::WHITE,
        }
    }

    /// Scale fall speed, drift and wobble by `factor`.
    pub fn with_motion_scale(mut self, factor: f32) -> Self {
        self.speed = (self.speed.0 * factor, self.speed.1 * factor);
        self.drift = (self.drift.0 * factor, self.drift.1 * factor);
        self.wobble_amplitude *= factor;
        self
    }
}

/// Fixed-size pool of snowflakes.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl ParticleField {
    /// Create a field and populate it with `config.count` flakes.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, width: u16, height: u16, rng: &mut R) -> Self {
        let mut field = Self {
            config,
            particles: Vec::new(),
            width: width as f32,
            height: height as f32,
        };
        let count = field.config.count;
        let spawn = field.config.initial_spawn;
        field.initialize(count, width, height, spawn, rng);
        field
    }

    /// Replace the pool with `count` freshly randomized flakes.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        width: u16,
        height: u16,
        spawn: Spawn,
        rng: &mut R,
    ) {
        self.width = width as f32;
        self.height = height as f32;
        self.particles = (0..count)
            .map(|_| {
                let mut particle = Particle {
                    x: 0.0,
                    y: 0.0,
                    size: 0.0,
                    speed: 0.0,
                    drift: 0.0,
                    wobble_phase: 0.0,
                    wobble_rate: 0.0,
                    opacity: 0.0,
                    fade_rate: 0.0,
                    state: ParticleState::Falling,
                };
                self.respawn(&mut particle, spawn, rng);
                particle
            })
            .collect();
    }

    /// Move every flake forward by `dt` seconds.
    ///
    /// Falling flakes integrate velocity plus wobble and are tested against
    /// `mask` at their floored position. Stuck flakes begin fading; fading
    /// flakes lose opacity and are recycled once transparent.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, mask: Option<&TextMask>, rng: &mut R) {
        let ticks = (dt * TICKS_PER_SECOND).clamp(0.0, MAX_TICKS_PER_ADVANCE);
        if ticks <= 0.0 || !ticks.is_finite() {
            return;
        }

        let mask = mask.filter(|_| self.config.collides);
        // Taken out so respawn can borrow `self` while iterating.
        let mut particles = std::mem::take(&mut self.particles);
        for particle in &mut particles {
            match particle.state {
                ParticleState::Falling => self.fall(particle, ticks, mask, rng),
                ParticleState::Stuck => {
                    particle.state = ParticleState::Fading;
                    self.fade(particle, ticks, rng);
                }
                ParticleState::Fading => self.fade(particle, ticks, rng),
            }
        }
        self.particles = particles;
    }

    fn fall<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        ticks: f32,
        mask: Option<&TextMask>,
        rng: &mut R,
    ) {
        let margin = self.config.margin;

        particle.y += particle.speed * ticks;
        particle.wobble_phase =
            (particle.wobble_phase + particle.wobble_rate * ticks) % std::f32::consts::TAU;
        particle.x +=
            (particle.drift + particle.wobble_phase.sin() * self.config.wobble_amplitude) * ticks;

        if particle.y > self.height + margin {
            self.respawn(particle, Spawn::Above, rng);
            return;
        }
        if particle.x > self.width + margin {
            particle.x = -margin;
        } else if particle.x < -margin {
            particle.x = self.width + margin;
        }

        let Some(mask) = mask else {
            return;
        };
        let px = particle.x.floor() as i32;
        let py = particle.y.floor() as i32;
        if mask.is_opaque_at(px, py) && rng.r#gen::<f32>() < self.config.stick_probability {
            let fade_seconds = sample(rng, self.config.fade_seconds).max(1.0 / TICKS_PER_SECOND);
            particle.state = ParticleState::Stuck;
            particle.fade_rate = particle.opacity.max(f32::EPSILON) / (fade_seconds * TICKS_PER_SECOND);
        }
    }

    fn fade<R: Rng + ?Sized>(&self, particle: &mut Particle, ticks: f32, rng: &mut R) {
        particle.opacity = (particle.opacity - particle.fade_rate * ticks).max(0.0);
        if particle.opacity <= 0.0 {
            self.respawn(particle, self.config.recycle_spawn, rng);
        }
    }

    /// Reset a flake to a fresh falling state.
    fn respawn<R: Rng + ?Sized>(&self, particle: &mut Particle, spawn: Spawn, rng: &mut R) {
        let config = &self.config;
        particle.x = sample(rng, (0.0, self.width));
        particle.y = match spawn {
            Spawn::Scattered => sample(rng, (0.0, self.height)),
            Spawn::Above => -sample(rng, (1.0, config.margin.max(1.0))),
        };
        particle.size = sample(rng, config.size).max(f32::EPSILON);
        particle.speed = sample(rng, config.speed);
        particle.drift = sample(rng, config.drift);
        particle.wobble_phase = sample(rng, (0.0, std::f32::consts::TAU));
        particle.wobble_rate = sample(rng, config.wobble_rate);
        particle.opacity = sample(rng, config.opacity).clamp(0.0, 1.0);
        particle.fade_rate = 0.0;
        particle.state = ParticleState::Falling;
    }

    /// Draw every visible flake onto `surface`.
    pub fn render(&self, surface: &mut Surface) {
        for particle in &self.particles {
            if particle.opacity <= 0.0 {
                continue;
            }
            let alpha = (particle.opacity * self.config.alpha_scale).clamp(0.0, 1.0);
            surface.fill_circle(
                particle.x,
                particle.y,
                self.drawn_radius(particle),
                self.config.color,
                alpha,
            );
        }
    }

    /// Radius a flake is drawn with at its current height.
    pub fn drawn_radius(&self, particle: &Particle) -> f32 {
        let t = if self.height > 0.0 {
            (particle.y / self.height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let depth = self.config.depth_top + (self.config.depth_bottom - self.config.depth_top) * t;
        (particle.size * depth).max(MIN_DRAW_RADIUS)
    }

    /// Adopt new bounds. Flakes left outside the new area are recycled.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.width = width as f32;
        self.height = height as f32;

        let margin = self.config.margin;
        let mut particles = std::mem::take(&mut self.particles);
        for particle in &mut particles {
            let outside = particle.x < -margin
                || particle.x > self.width + margin
                || particle.y > self.height + margin;
            if outside {
                self.respawn(particle, Spawn::Scattered, rng);
            }
        }
        self.particles = particles;
    }

    /// Swap in a new tuning, keeping the pool.
    ///
    /// Speeds and drift of live flakes are rescaled by the ratio of the new
    /// range maxima to the old, so a retuned field moves at the new pace
    /// without respawning. The pool size stays as it was.
    pub fn set_config(&mut self, config: FieldConfig) {
        let ratio = |old: f32, new: f32| if old.abs() > f32::EPSILON { new / old } else { 1.0 };
        let speed = ratio(self.config.speed.1, config.speed.1);
        let drift = ratio(self.config.drift.1, config.drift.1);
        for particle in &mut self.particles {
            particle.speed *= speed;
            particle.drift *= drift;
        }
        self.config = FieldConfig {
            count: self.particles.len(),
            ..config
        };
    }

    pub fn set_stick_probability(&mut self, probability: f32) {
        self.config.stick_probability = probability.clamp(0.0, 1.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Flakes currently settled on the label (stuck or fading).
    pub fn settled_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.state != ParticleState::Falling)
            .count()
    }
}

/// Uniform sample from `(min, max)`, or `min` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use flurry_core::ViewportTier;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn assert_invariants(field: &ParticleField) {
        for p in field.particles() {
            assert!((0.0..=1.0).contains(&p.opacity), "opacity {}", p.opacity);
            assert!(field.drawn_radius(p) > 0.0);
        }
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(7);
        let mask = TextMask::new(100, 30, "FLURRY", ViewportTier::Wide);
        let mut field = ParticleField::new(FieldConfig::logo(100, 30), 100, 30, &mut rng);

        for _ in 0..2000 {
            field.advance(DT, Some(&mask), &mut rng);
            assert_invariants(&field);
        }
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn test_exit_bottom_respawns_above() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut config = FieldConfig::viewport();
        config.count = 1;
        let mut field = ParticleField::new(config, 40, 20, &mut rng);

        field.particles[0].y = 20.0 + field.config.margin - 0.01;
        field.particles[0].speed = 0.5;
        field.advance(DT, None, &mut rng);

        let p = &field.particles()[0];
        assert!(p.y < 0.0, "expected respawn above the top, got y={}", p.y);
        assert_eq!(p.state, ParticleState::Falling);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_side_exit_wraps() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut config = FieldConfig::viewport();
        config.count = 1;
        config.wobble_amplitude = 0.0;
        let mut field = ParticleField::new(config, 40, 20, &mut rng);

        let margin = field.config.margin;
        field.particles[0].y = 5.0;
        field.particles[0].x = 40.0 + margin;
        field.particles[0].drift = 0.1;
        field.advance(DT, None, &mut rng);
        assert_eq!(field.particles()[0].x, -margin);

        field.particles[0].x = -margin;
        field.particles[0].drift = -0.1;
        field.advance(DT, None, &mut rng);
        assert_eq!(field.particles()[0].x, 40.0 + margin);
    }

    #[test]
    fn test_stick_rate_is_partial_across_seeds() {
        let mut total_settled = 0;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mask = TextMask::new(100, 30, "FLURRY", ViewportTier::Wide);
            let mut field = ParticleField::new(FieldConfig::logo(100, 30), 100, 30, &mut rng);

            for _ in 0..120 {
                field.advance(DT, Some(&mask), &mut rng);
            }
            let settled = field.settled_count();
            assert!(settled < field.len(), "seed {seed}: every flake settled");
            total_settled += settled;
        }
        assert!(total_settled > 0, "no flake ever settled");
    }

    #[test]
    fn test_no_mask_means_no_sticking() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new(FieldConfig::logo(100, 30), 100, 30, &mut rng);
        for _ in 0..600 {
            field.advance(DT, None, &mut rng);
        }
        assert_eq!(field.settled_count(), 0);
    }

    #[test]
    fn test_zero_probability_never_sticks() {
        let mut rng = StdRng::seed_from_u64(4);
        let mask = TextMask::new(40, 20, "HHH", ViewportTier::Compact);
        assert!(mask.opaque_count() > 0);
        let mut field = ParticleField::new(FieldConfig::logo(40, 20), 40, 20, &mut rng);
        field.set_stick_probability(0.0);
        for _ in 0..300 {
            field.advance(DT, Some(&mask), &mut rng);
        }
        assert_eq!(field.settled_count(), 0);
    }

    #[test]
    fn test_fading_finishes_within_bound_then_resets() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut config = FieldConfig::viewport();
        config.count = 1;
        config.opacity = (0.4, 0.9);
        let mut field = ParticleField::new(config, 40, 20, &mut rng);

        field.particles[0].state = ParticleState::Fading;
        field.particles[0].opacity = 1.0;
        field.particles[0].fade_rate = 0.01;

        let mut ticks = 0;
        while field.particles()[0].state != ParticleState::Falling {
            field.advance(DT, None, &mut rng);
            ticks += 1;
            assert!(ticks <= 101, "fade did not finish");
        }
        let p = &field.particles()[0];
        assert!((0.4..=0.9).contains(&p.opacity));
        assert!(p.y < 0.0);
    }

    #[test]
    fn test_stuck_flake_is_frozen() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut config = FieldConfig::logo(100, 30);
        config.count = 1;
        let mut field = ParticleField::new(config, 100, 30, &mut rng);

        field.particles[0].state = ParticleState::Stuck;
        field.particles[0].fade_rate = 0.001;
        let (x, y) = (field.particles()[0].x, field.particles()[0].y);
        field.advance(DT, None, &mut rng);
        field.advance(DT, None, &mut rng);

        let p = &field.particles()[0];
        assert_eq!(p.state, ParticleState::Fading);
        assert_eq!((p.x, p.y), (x, y));
    }

    #[test]
    fn test_depth_falloff_and_radius_floor() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut config = FieldConfig::logo(100, 30);
        config.count = 1;
        let mut field = ParticleField::new(config, 100, 30, &mut rng);

        field.particles[0].size = 2.0;
        field.particles[0].y = 0.0;
        let top = field.drawn_radius(&field.particles()[0]);
        field.particles[0].y = 30.0;
        let bottom = field.drawn_radius(&field.particles()[0]);
        assert!((top - 2.0).abs() < 1e-6);
        assert!((bottom - 0.6).abs() < 1e-6);

        field.particles[0].size = 0.01;
        assert_eq!(field.drawn_radius(&field.particles()[0]), MIN_DRAW_RADIUS);
    }

    #[test]
    fn test_render_skips_transparent_flakes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut config = FieldConfig::viewport();
        config.count = 3;
        let mut field = ParticleField::new(config, 40, 20, &mut rng);
        for p in &mut field.particles {
            p.opacity = 0.0;
        }
        let mut surface = Surface::new(40, 20);
        field.render(&mut surface);
        assert_eq!(surface.painted_count(), 0);

        field.particles[0].opacity = 1.0;
        field.particles[0].x = 10.0;
        field.particles[0].y = 10.0;
        field.render(&mut surface);
        assert!(surface.painted_count() > 0);
    }

    #[test]
    fn test_resize_keeps_pool_size_and_bounds() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut field = ParticleField::new(FieldConfig::viewport(), 120, 80, &mut rng);
        field.resize(40, 20, &mut rng);
        assert_eq!(field.len(), 150);
        let margin = field.config().margin;
        for p in field.particles() {
            assert!(p.x >= -margin && p.x <= 40.0 + margin);
            assert!(p.y <= 20.0 + margin);
        }
    }

    #[test]
    fn test_presets() {
        let viewport = FieldConfig::viewport();
        assert_eq!(viewport.size, (0.25, 1.0));
        assert_eq!(viewport.speed, (0.125, 0.5));
        assert_eq!(viewport.drift, (-0.125, 0.125));
        assert_eq!(viewport.opacity, (0.3, 1.0));
        assert_eq!(viewport.margin, 2.5);
        assert_eq!((viewport.depth_top, viewport.depth_bottom), (1.0, 1.0));
        assert!(!viewport.collides);

        let logo = FieldConfig::logo(100, 30);
        assert_eq!(logo.size, (0.5, 2.5));
        assert!((logo.speed.1 - 40.0 / 180.0).abs() < 1e-6);
        assert!((logo.speed.0 - 0.3 * logo.speed.1).abs() < 1e-6);
        assert!((logo.drift.1 - 15.0 / 180.0).abs() < 1e-6);
        assert_eq!(logo.drift.0, -logo.drift.1);
        assert_eq!(logo.margin, 5.0);
        assert_eq!(logo.alpha_scale, 0.8);
        assert_eq!((logo.depth_top, logo.depth_bottom), (1.0, 0.3));
        assert!(logo.collides);
    }

    #[test]
    fn test_viewport_flakes_pass_through_label() {
        let mut rng = StdRng::seed_from_u64(12);
        let mask = TextMask::new(120, 80, "FLURRY", ViewportTier::Wide);
        assert!(mask.opaque_count() > 0);
        let mut field = ParticleField::new(FieldConfig::viewport(), 120, 80, &mut rng);
        for _ in 0..600 {
            field.advance(DT, Some(&mask), &mut rng);
        }
        assert_eq!(field.settled_count(), 0);
    }

    #[test]
    fn test_set_config_rescales_live_flakes() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut field = ParticleField::new(FieldConfig::logo(60, 22), 60, 22, &mut rng);
        let before: Vec<(f32, f32)> = field.particles().iter().map(|p| (p.speed, p.drift)).collect();
        let old = field.config().clone();

        let retuned = FieldConfig::logo(100, 30);
        let speed_ratio = retuned.speed.1 / old.speed.1;
        let drift_ratio = retuned.drift.1 / old.drift.1;
        field.set_config(retuned.clone());

        assert_eq!(field.len(), 150);
        assert_eq!(field.config().speed, retuned.speed);
        for (p, (speed, drift)) in field.particles().iter().zip(before) {
            assert!((p.speed - speed * speed_ratio).abs() < 1e-5);
            assert!((p.drift - drift * drift_ratio).abs() < 1e-5);
            assert!(p.speed <= retuned.speed.1 + 1e-5);
        }
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut config = FieldConfig::viewport();
        config.count = 1;
        config.wobble_amplitude = 0.0;
        let mut field = ParticleField::new(config, 40, 200, &mut rng);
        field.particles[0].y = 0.0;
        field.particles[0].speed = 1.0;
        field.advance(10.0, None, &mut rng);
        assert!((field.particles()[0].y - MAX_TICKS_PER_ADVANCE).abs() < 1e-4);
    }
}
