//! Snow settling on the label.

use std::time::{Duration, Instant};

use flurry_background::{
    Debouncer, FieldConfig, ParticleField, RESIZE_DEBOUNCE, RenderLoop, Rgb, SnowScene, Surface,
    TextMask, TickScheduler,
};
use flurry_config::{Config, PreferenceStore, save_snow_enabled};
use flurry_core::{AnimationSpeed, Effect, SurfaceLayout, ViewportTier};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tracing::{debug, info};

/// Color the label is painted in beneath the flakes.
pub const LABEL_COLOR: Rgb = Rgb::new(0.55, 0.62, 0.78);

/// Settings the snow effect is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowSettings {
    pub label: String,
    pub layout: SurfaceLayout,
    pub speed: AnimationSpeed,
    pub particle_count: usize,
    pub stick_probability: f32,
    pub frame_rate: u32,
    pub seed: Option<u64>,
}

impl From<&Config> for SnowSettings {
    fn from(config: &Config) -> Self {
        Self {
            label: config.label.clone(),
            layout: config.layout,
            speed: config.speed,
            particle_count: config.particle_count,
            stick_probability: config.stick_probability,
            frame_rate: config.frame_rate,
            seed: config.seed,
        }
    }
}

impl SnowSettings {
    fn field_config(&self, width: u16, height: u16) -> FieldConfig {
        let base = match self.layout {
            SurfaceLayout::Logo => FieldConfig::logo(width, height),
            SurfaceLayout::Viewport => FieldConfig::viewport(),
        };
        FieldConfig {
            count: self.particle_count,
            stick_probability: self.stick_probability,
            ..base
        }
        .with_motion_scale(self.speed.snow_fall_speed())
    }
}

/// The snow background: particle field, label mask, surface and the loop
/// that drives them.
pub struct SnowEffect {
    settings: SnowSettings,
    surface: Surface,
    mask: TextMask,
    field: ParticleField,
    render_loop: RenderLoop,
    scheduler: TickScheduler,
    resize: Debouncer<(u16, u16)>,
    rng: StdRng,
    enabled: bool,
}

impl SnowEffect {
    /// Build the effect for a terminal `columns` x `rows`. Starts disabled.
    pub fn new(settings: SnowSettings, columns: u16, rows: u16) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (width, height) = settings.layout.surface_size(columns, rows);
        let tier = ViewportTier::for_columns(columns);
        let mask = TextMask::new(width, height, &settings.label, tier);
        let field = ParticleField::new(settings.field_config(width, height), width, height, &mut rng);

        Self {
            scheduler: TickScheduler::new(settings.frame_rate),
            settings,
            surface: Surface::new(width, height),
            mask,
            field,
            render_loop: RenderLoop::new(),
            resize: Debouncer::new(RESIZE_DEBOUNCE),
            rng,
            enabled: false,
        }
    }

    /// Flip the effect and persist the new state under the snow key.
    pub fn toggle_persisted(&mut self, store: &mut dyn PreferenceStore) -> bool {
        let enabled = self.toggle();
        save_snow_enabled(store, enabled);
        enabled
    }

    /// Follow terminal focus. Losing focus pauses the loop; regaining it
    /// resumes only while the effect is enabled.
    pub fn set_visible(&mut self, visible: bool) {
        self.render_loop
            .set_visible(visible, self.enabled, &mut self.scheduler);
    }

    /// Record a terminal resize. The surface and mask are rebuilt once the
    /// burst settles.
    pub fn on_resize(&mut self, columns: u16, rows: u16, now: Instant) {
        self.resize.push((columns, rows), now);
    }

    fn apply_resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = self.settings.layout.surface_size(columns, rows);
        let tier = ViewportTier::for_columns(columns);
        self.surface.resize(width, height);
        self.mask.rebuild(width, height, &self.settings.label, tier);
        self.field
            .set_config(self.settings.field_config(width, height));
        self.field.resize(width, height, &mut self.rng);
        debug!(columns, rows, width, height, "snow surface resized");
    }

    /// Run any due work. Returns `true` when a frame was drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some((columns, rows)) = self.resize.poll(now) {
            self.apply_resize(columns, rows);
        }

        let Some(token) = self.scheduler.take_due(now) else {
            return false;
        };
        let mut scene = SnowScene {
            field: &mut self.field,
            mask: Some(&self.mask),
            surface: &mut self.surface,
            rng: &mut self.rng,
            label_color: Some(LABEL_COLOR),
        };
        self.render_loop
            .on_frame(token, now, &mut self.scheduler, &mut scene)
    }

    /// Time until [`tick`](Self::tick) has work to do.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let frame = self.scheduler.time_until_due(now);
        let resize = self.resize.time_until_ready(now);
        match (frame, resize) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cells the surface occupies, centered in `area`.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = self.surface.width().min(area.width);
        let height = self.surface.height().div_ceil(2).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn mask(&self) -> &TextMask {
        &self.mask
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }
}

impl Effect for SnowEffect {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn enable(&mut self) -> bool {
        if !self.enabled {
            self.enabled = true;
            self.render_loop.start(&mut self.scheduler);
            info!(particles = self.field.len(), "snow enabled");
        }
        true
    }

    fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.render_loop.stop(&mut self.scheduler);
        self.surface.clear();
        info!("snow disabled");
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flurry_config::{MemoryPreferenceStore, SNOW_KEY};

    fn settings() -> SnowSettings {
        SnowSettings {
            label: "FLURRY".to_string(),
            layout: SurfaceLayout::Logo,
            speed: AnimationSpeed::Medium,
            particle_count: 40,
            stick_probability: 0.7,
            frame_rate: 1000,
            seed: Some(11),
        }
    }

    #[test]
    fn test_surface_follows_layout() {
        let snow = SnowEffect::new(settings(), 120, 40);
        assert_eq!(snow.surface().width(), 100);
        assert_eq!(snow.surface().height(), 30);
        assert_eq!(snow.mask().tier(), ViewportTier::Wide);
        assert_eq!(snow.field().len(), 40);

        let viewport = SnowEffect::new(
            SnowSettings {
                layout: SurfaceLayout::Viewport,
                ..settings()
            },
            80,
            24,
        );
        assert_eq!(viewport.surface().width(), 80);
        assert_eq!(viewport.surface().height(), 48);
    }

    #[test]
    fn test_enable_runs_frames() {
        let mut snow = SnowEffect::new(settings(), 80, 24);
        assert!(!snow.tick(Instant::now() + Duration::from_secs(1)));

        assert!(snow.enable());
        assert!(snow.is_running());
        assert!(snow.tick(Instant::now() + Duration::from_secs(1)));
        assert_eq!(snow.frames(), 1);
        assert!(snow.surface().painted_count() > 0);

        snow.disable();
        assert!(!snow.is_running());
        assert_eq!(snow.surface().painted_count(), 0);
        assert!(!snow.tick(Instant::now() + Duration::from_secs(2)));
    }

    #[test]
    fn test_focus_loss_pauses() {
        let mut snow = SnowEffect::new(settings(), 80, 24);
        snow.enable();
        snow.set_visible(false);
        assert!(!snow.is_running());
        assert!(!snow.tick(Instant::now() + Duration::from_secs(1)));
        snow.set_visible(true);
        assert!(snow.is_running());
    }

    #[test]
    fn test_focus_gain_while_disabled_stays_stopped() {
        let mut snow = SnowEffect::new(settings(), 80, 24);
        snow.enable();
        snow.set_visible(false);
        snow.disable();
        snow.set_visible(true);
        assert!(!snow.is_running());
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut snow = SnowEffect::new(settings(), 80, 24);
        let start = Instant::now();
        for columns in 100..110 {
            snow.on_resize(columns, 40, start);
        }
        snow.tick(start);
        assert_eq!(snow.surface().width(), 60);

        snow.tick(start + RESIZE_DEBOUNCE);
        assert_eq!(snow.surface().width(), 100);
        assert_eq!(snow.mask().width(), 100);
        assert_eq!(snow.field().bounds(), (100.0, 30.0));
    }

    #[test]
    fn test_resize_across_breakpoint_retunes_fall() {
        let mut snow = SnowEffect::new(settings(), 80, 24);
        assert_eq!(snow.field().config().speed, settings().field_config(60, 22).speed);

        let start = Instant::now();
        snow.on_resize(120, 40, start);
        snow.tick(start + RESIZE_DEBOUNCE);

        let expected = settings().field_config(100, 30);
        assert_eq!(snow.field().config().speed, expected.speed);
        assert_eq!(snow.field().config().drift, expected.drift);
        assert_eq!(snow.field().len(), 40);
        for p in snow.field().particles() {
            assert!(p.speed <= expected.speed.1 + 1e-5);
        }
    }

    #[test]
    fn test_toggle_persists_flag() {
        let mut store = MemoryPreferenceStore::new();
        let mut snow = SnowEffect::new(settings(), 80, 24);

        assert!(snow.toggle_persisted(&mut store));
        assert_eq!(store.get(SNOW_KEY).unwrap().as_deref(), Some("enabled"));
        assert!(!snow.toggle_persisted(&mut store));
        assert_eq!(store.get(SNOW_KEY).unwrap().as_deref(), Some("disabled"));
    }

    #[test]
    fn test_placement_is_centered() {
        let snow = SnowEffect::new(settings(), 80, 24);
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(snow.placement(area), Rect::new(10, 6, 60, 11));
    }
}
