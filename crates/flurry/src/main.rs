mod logging;
mod snow;
mod texture_source;
mod theme;

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use flurry_background::{
    BackdropController, Debouncer, LiquidMaterial, LiquidPlane, RESIZE_DEBOUNCE, Rgb, ShaderPlane,
    Surface, TextMask,
};
use flurry_config::{
    Config, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, load_snow_enabled,
};
use flurry_core::{Effect, Theme, ViewportTier};
use flurry_fonts::build_label_art;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{debug, info, warn};

use crate::snow::{LABEL_COLOR, SnowEffect, SnowSettings};
use crate::texture_source::texture_source;
use crate::theme::{Effects, ThemeCoordinator};

/// Environment variable that forces reduced motion when set to anything but
/// `0`, `false` or an empty string.
const REDUCED_MOTION_ENV: &str = "FLURRY_REDUCED_MOTION";

/// Longest the event loop sleeps when no animation is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    let config = Config::load();
    info!(log = ?log_path, ?config, "starting flurry");

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableFocusChange)?;
    let result = match terminal.size() {
        Ok(size) => App::new(config, size.width, size.height).run(terminal),
        Err(err) => Err(err.into()),
    };
    if let Err(err) = execute!(stdout(), DisableFocusChange) {
        warn!(%err, "could not disable focus reporting");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    label: String,
    reduced_motion: bool,
    theme: ThemeCoordinator,
    snow: SnowEffect,
    liquid: BackdropController<LiquidPlane>,
    liquid_surface: Surface,
    /// Label drawn over the liquid plane.
    liquid_mask: TextMask,
    liquid_resize: Debouncer<(u16, u16)>,
    frame_interval: Duration,
    last_liquid_frame: Option<Instant>,
    focused: bool,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal `columns` x `rows`.
    pub fn new(config: Config, columns: u16, rows: u16) -> Self {
        let store: Box<dyn PreferenceStore> = match FilePreferenceStore::in_data_dir() {
            Some(store) => Box::new(store),
            None => {
                warn!("no data directory, preferences will not be saved");
                Box::new(MemoryPreferenceStore::unavailable())
            }
        };

        let material = LiquidMaterial {
            metalness: config.liquid.metalness,
            roughness: config.liquid.roughness,
            displacement_scale: config.liquid.displacement_scale,
            rain: config.liquid.rain,
        };
        let mut plane = LiquidPlane::new(material, config.speed);
        let (width, height) = (columns, rows.saturating_mul(2));
        plane.resize(width, height);
        let liquid = BackdropController::new(plane, texture_source(&config.liquid.texture));

        Self {
            running: false,
            label: config.label.clone(),
            reduced_motion: config.reduced_motion || reduced_motion_from_env(),
            theme: ThemeCoordinator::new(store),
            snow: SnowEffect::new(SnowSettings::from(&config), columns, rows),
            liquid,
            liquid_surface: Surface::new(width, height),
            liquid_mask: TextMask::new(
                width,
                height,
                &config.label,
                ViewportTier::for_columns(columns),
            ),
            liquid_resize: Debouncer::new(RESIZE_DEBOUNCE),
            frame_interval: Duration::from_secs_f64(1.0 / config.frame_rate.max(1) as f64),
            last_liquid_frame: None,
            focused: true,
        }
    }

    fn effects(&mut self) -> (&mut ThemeCoordinator, Effects<'_>) {
        (
            &mut self.theme,
            Effects {
                snow: Some(&mut self.snow),
                liquid: Some(&mut self.liquid),
            },
        )
    }

    /// Restore the saved theme. On first run the standalone snow flag
    /// decides whether snow starts.
    fn restore(&mut self) {
        let reduced_motion = self.reduced_motion;
        let first_run = !self.theme.has_stored_theme();
        let snow_flag = load_snow_enabled(self.theme.store());

        let (theme, mut effects) = self.effects();
        let restored = theme.restore(reduced_motion, &mut effects);
        if first_run && snow_flag && !reduced_motion && restored == Theme::Off {
            theme.apply_theme(Theme::Snow, &mut effects);
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.restore();
        while self.running {
            self.tick(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.disable_all();
        Ok(())
    }

    /// Advance whichever effects are due.
    fn tick(&mut self, now: Instant) {
        self.snow.tick(now);

        if let Some((columns, rows)) = self.liquid_resize.poll(now) {
            let (width, height) = (columns, rows.saturating_mul(2));
            self.liquid.resize(width, height);
            self.liquid_surface.resize(width, height);
            self.liquid_mask
                .rebuild(width, height, &self.label, ViewportTier::for_columns(columns));
        }

        self.liquid.poll();
        if !self.liquid.is_enabled() || !self.focused {
            self.last_liquid_frame = None;
            return;
        }
        let dt = match self.last_liquid_frame {
            Some(last) if now.duration_since(last) < self.frame_interval => return,
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => self.frame_interval.as_secs_f32(),
        };
        self.last_liquid_frame = Some(now);

        if let Some(plane) = self.liquid.plane_mut() {
            plane.advance(dt);
            self.liquid_surface.clear();
            plane.render(&mut self.liquid_surface);
            self.liquid_mask
                .paint(&mut self.liquid_surface, Rgb::WHITE, 0.85);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
        let stage = chunks[0];

        let liquid_shown = self.liquid.is_enabled();
        if liquid_shown {
            frame.render_widget(&self.liquid_surface, stage);
        }
        if self.snow.is_enabled() {
            frame.render_widget(self.snow.surface(), self.snow.placement(stage));
        }
        if !liquid_shown && !self.snow.is_enabled() {
            self.render_plain_label(frame, stage);
        }

        let icon = self.theme.icon();
        let accent = Color::Rgb(140, 158, 199);
        let help = Line::from(vec![
            format!("{} ", icon.glyph()).fg(accent),
            icon.title().dark_gray(),
            "  ".into(),
            "t".bold().fg(accent),
            " theme  ".dark_gray(),
            "s".bold().fg(accent),
            " snow  ".dark_gray(),
            "q".bold().fg(accent),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// The label as block text, used when no effect is running.
    fn render_plain_label(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = build_label_art(&self.label)
            .into_iter()
            .map(|s| Line::from(s).style(Style::new().fg(LABEL_COLOR.to_color())))
            .collect();
        let height = lines.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            chunks[1],
        );
    }

    /// How long to wait for input before the next frame is due.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = IDLE_POLL;
        if let Some(wait) = self.snow.time_until_next(now) {
            timeout = timeout.min(wait);
        }
        if let Some(wait) = self.liquid_resize.time_until_ready(now) {
            timeout = timeout.min(wait);
        }
        if self.liquid.is_enabled() || self.liquid.is_enable_pending() {
            timeout = timeout.min(self.frame_interval);
        }
        timeout
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.on_resize(columns, rows),
                Event::FocusGained => self.set_focused(true),
                Event::FocusLost => self.set_focused(false),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.cycle_theme(),
            (_, KeyCode::Char('s')) => self.toggle_snow(),
            _ => {}
        }
    }

    /// Cycle off, snow, liquid.
    fn cycle_theme(&mut self) {
        let (theme, mut effects) = self.effects();
        theme.cycle(&mut effects);
    }

    /// Toggle snow on its own, leaving the theme alone.
    fn toggle_snow(&mut self) {
        let enabled = self.snow.toggle_persisted(self.theme.store_mut());
        debug!(enabled, "snow toggled");
    }

    fn on_resize(&mut self, columns: u16, rows: u16) {
        let now = Instant::now();
        self.snow.on_resize(columns, rows, now);
        self.liquid_resize.push((columns, rows), now);
    }

    fn set_focused(&mut self, focused: bool) {
        debug!(focused, "focus changed");
        self.focused = focused;
        self.snow.set_visible(focused);
    }

    fn disable_all(&mut self) {
        let (theme, mut effects) = self.effects();
        theme.disable_all(&mut effects);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn reduced_motion_from_env() -> bool {
    std::env::var(REDUCED_MOTION_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no")
}
