//! Frame loop driver.
//!
//! The host owns a [`FrameScheduler`] that fires one callback per repaint.
//! [`RenderLoop`] holds at most one outstanding frame token, re-requests after
//! every frame it runs and cancels the outstanding token when stopped, so a
//! frame requested before a stop can never run afterwards.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, trace};

use crate::animations::snow::ParticleField;
use crate::color::Rgb;
use crate::mask::TextMask;
use crate::surface::Surface;

/// Step used for the first frame after a start.
const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

/// Handle identifying one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host repaint scheduler.
pub trait FrameScheduler {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a requested frame. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Scheduler for a polling event loop: one pending frame at a time, due a
/// fixed interval after it was requested.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameToken, Instant)>,
}

impl TickScheduler {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64),
            next_id: 0,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a frame due one interval after `now`.
    pub fn request_frame_at(&mut self, now: Instant) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some((token, now + self.interval));
        token
    }

    /// Take the pending frame if it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameToken> {
        match self.pending {
            Some((token, deadline)) if deadline <= now => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }

    /// Time until the pending frame is due, if one is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for TickScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.request_frame_at(Instant::now())
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if matches!(self.pending, Some((pending, _)) if pending == token) {
            self.pending = None;
        }
    }
}

/// Work done on every frame: clear, advance the simulation, then draw.
pub trait Scene {
    fn clear(&mut self);
    fn advance(&mut self, dt: f32);
    fn render(&mut self);
}

/// The snow scene: a particle field drawn over the label mask.
pub struct SnowScene<'a, R: Rng + ?Sized> {
    pub field: &'a mut ParticleField,
    pub mask: Option<&'a TextMask>,
    pub surface: &'a mut Surface,
    pub rng: &'a mut R,
    /// Color the label is painted in under the flakes, if painted at all.
    pub label_color: Option<Rgb>,
}

impl<R: Rng + ?Sized> Scene for SnowScene<'_, R> {
    fn clear(&mut self) {
        self.surface.clear();
    }

    fn advance(&mut self, dt: f32) {
        self.field.advance(dt, self.mask, self.rng);
    }

    fn render(&mut self) {
        if let (Some(mask), Some(color)) = (self.mask, self.label_color) {
            mask.paint(self.surface, color, 1.0);
        }
        self.field.render(self.surface);
    }
}

/// Run state of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// Drives a [`Scene`] from host frame callbacks.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<FrameToken>,
    last_frame: Option<Instant>,
    frames: u64,
    hidden: bool,
    /// Set when the loop was running (or asked to start) while hidden.
    resume_on_show: bool,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Begin requesting frames. No-op if already running. While hidden the
    /// start is deferred until the host is shown again.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.is_running() {
            return;
        }
        if self.hidden {
            self.resume_on_show = true;
            return;
        }
        self.state = LoopState::Running;
        self.last_frame = None;
        self.pending = Some(scheduler.request_frame());
        debug!("render loop started");
    }

    /// Stop and cancel the outstanding frame. No-op if already stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.resume_on_show = false;
        if !self.is_running() {
            return;
        }
        self.state = LoopState::Stopped;
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
        debug!("render loop stopped");
    }

    /// Follow host visibility.
    ///
    /// Hiding stops the loop and remembers that it was running. Showing
    /// restarts it only if it was running and `enabled` is still true.
    pub fn set_visible(
        &mut self,
        visible: bool,
        enabled: bool,
        scheduler: &mut dyn FrameScheduler,
    ) {
        if !visible {
            if self.hidden {
                return;
            }
            let was_running = self.is_running();
            self.stop(scheduler);
            self.hidden = true;
            self.resume_on_show = was_running;
            return;
        }

        self.hidden = false;
        if std::mem::take(&mut self.resume_on_show) && enabled {
            self.start(scheduler);
        }
    }

    /// Handle a fired frame.
    ///
    /// Returns `false` without touching the scene when the loop is stopped or
    /// `token` is not the outstanding frame.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        now: Instant,
        scheduler: &mut dyn FrameScheduler,
        scene: &mut dyn Scene,
    ) -> bool {
        if !self.is_running() || self.pending != Some(token) {
            trace!(?token, "ignoring stale frame");
            return false;
        }
        self.pending = None;

        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(FIRST_FRAME_DT);
        self.last_frame = Some(now);

        scene.clear();
        scene.advance(dt);
        scene.render();
        self.frames += 1;

        self.pending = Some(scheduler.request_frame());
        true
    }
}
