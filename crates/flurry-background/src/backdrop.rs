//! Lifecycle of the shaded backdrop.
//!
//! The backdrop needs a texture before it can show anything. Loading runs on a
//! single background thread started by the first [`BackdropController::initialize`]
//! call; every later call shares that load. The finished texture is handed to
//! the plane on the frame loop thread in [`BackdropController::poll`].

use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use flurry_core::Effect;
use tracing::{debug, error, info, warn};

use crate::texture::{Texture, TextureError};

/// Capabilities the controller needs from a rendering plane.
pub trait ShaderPlane {
    /// Resume animating and show the plane.
    fn enable(&mut self);

    /// Pause animating and hide the plane.
    fn disable(&mut self);

    fn resize(&mut self, width: u16, height: u16);

    /// Install the texture sampled by the surface material.
    fn load_texture(&mut self, texture: Texture);
}

/// Somewhere a texture can be loaded from. Called on the loader thread.
pub trait TextureSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Texture, TextureError>;
}

/// Outcome of [`BackdropController::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
enum LoadPhase {
    Idle,
    Loading,
    Loaded(Texture),
    Applied,
    Failed(String),
}

impl LoadPhase {
    fn status(&self) -> Option<InitStatus> {
        match self {
            LoadPhase::Idle => None,
            LoadPhase::Loading => Some(InitStatus::Pending),
            LoadPhase::Loaded(_) | LoadPhase::Applied => Some(InitStatus::Ready),
            LoadPhase::Failed(_) => Some(InitStatus::Failed),
        }
    }
}

type Shared = Arc<(Mutex<LoadPhase>, Condvar)>;

/// Owns a [`ShaderPlane`] and its one-time asynchronous setup.
///
/// A controller built with [`unavailable`](Self::unavailable) has no plane:
/// it initializes to [`InitStatus::Failed`] and refuses every enable.
pub struct BackdropController<P: ShaderPlane> {
    plane: Option<P>,
    source: Arc<dyn TextureSource>,
    shared: Shared,
    enabled: bool,
    enable_pending: bool,
}

impl<P: ShaderPlane> BackdropController<P> {
    pub fn new(plane: P, source: Arc<dyn TextureSource>) -> Self {
        Self::build(Some(plane), source)
    }

    /// A controller whose rendering prerequisites are missing.
    pub fn unavailable(source: Arc<dyn TextureSource>) -> Self {
        Self::build(None, source)
    }

    fn build(plane: Option<P>, source: Arc<dyn TextureSource>) -> Self {
        Self {
            plane,
            source,
            shared: Arc::new((Mutex::new(LoadPhase::Idle), Condvar::new())),
            enabled: false,
            enable_pending: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.plane.is_some()
    }

    /// Start the texture load if it has not been started.
    ///
    /// Safe to call any number of times. Only the first call spawns a loader;
    /// later calls report the state of that same load.
    pub fn initialize(&mut self) -> InitStatus {
        if self.plane.is_none() {
            error!("liquid backdrop unavailable: no shader plane");
            return InitStatus::Failed;
        }

        let (lock, _) = &*self.shared;
        let Ok(mut phase) = lock.lock() else {
            return InitStatus::Failed;
        };
        if let Some(status) = phase.status() {
            return status;
        }
        *phase = LoadPhase::Loading;
        drop(phase);

        let shared = Arc::clone(&self.shared);
        let source = Arc::clone(&self.source);
        info!(source = %source.describe(), "loading liquid texture");
        thread::spawn(move || {
            let result = source.load();
            let (lock, cvar) = &*shared;
            if let Ok(mut phase) = lock.lock() {
                *phase = match result {
                    Ok(texture) => LoadPhase::Loaded(texture),
                    Err(err) => {
                        warn!(source = %source.describe(), "liquid texture failed: {err}");
                        LoadPhase::Failed(err.to_string())
                    }
                };
            }
            cvar.notify_all();
        });

        InitStatus::Pending
    }

    /// Current load state without starting anything. `None` before the
    /// first [`initialize`](Self::initialize).
    pub fn status(&self) -> Option<InitStatus> {
        if self.plane.is_none() {
            return Some(InitStatus::Failed);
        }
        let (lock, _) = &*self.shared;
        match lock.lock() {
            Ok(phase) => phase.status(),
            Err(_) => Some(InitStatus::Failed),
        }
    }

    /// Block until the load finishes or `timeout` passes.
    pub fn wait(&self, timeout: Duration) -> Option<InitStatus> {
        if self.plane.is_none() {
            return Some(InitStatus::Failed);
        }
        let (lock, cvar) = &*self.shared;
        let Ok(phase) = lock.lock() else {
            return Some(InitStatus::Failed);
        };
        match cvar.wait_timeout_while(phase, timeout, |p| matches!(p, LoadPhase::Loading)) {
            Ok((phase, _)) => phase.status(),
            Err(_) => Some(InitStatus::Failed),
        }
    }

    /// Apply a finished load. Call once per frame on the loop thread.
    pub fn poll(&mut self) {
        let Some(plane) = self.plane.as_mut() else {
            return;
        };

        let (lock, _) = &*self.shared;
        let Ok(mut phase) = lock.lock() else {
            return;
        };
        if matches!(*phase, LoadPhase::Loaded(_))
            && let LoadPhase::Loaded(texture) = std::mem::replace(&mut *phase, LoadPhase::Applied)
        {
            debug!(
                width = texture.width(),
                height = texture.height(),
                "applying liquid texture"
            );
            plane.load_texture(texture);
        }
        if let LoadPhase::Failed(reason) = &*phase {
            if self.enable_pending {
                error!("liquid backdrop could not be enabled: {reason}");
                self.enable_pending = false;
            }
            return;
        }
        let ready = matches!(*phase, LoadPhase::Applied);
        drop(phase);

        if ready && self.enable_pending {
            self.enable_pending = false;
            self.enabled = true;
            plane.enable();
            info!("liquid backdrop enabled");
        }
    }

    /// Whether an enable is waiting on the texture load.
    pub fn is_enable_pending(&self) -> bool {
        self.enable_pending
    }

    /// Whether setup finished successfully.
    pub fn is_initialized(&self) -> bool {
        self.status() == Some(InitStatus::Ready)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if let Some(plane) = self.plane.as_mut() {
            plane.resize(width, height);
        }
    }

    pub fn plane(&self) -> Option<&P> {
        self.plane.as_ref()
    }

    pub fn plane_mut(&mut self) -> Option<&mut P> {
        self.plane.as_mut()
    }
}

impl<P: ShaderPlane> Effect for BackdropController<P> {
    fn name(&self) -> &'static str {
        "liquid"
    }

    /// Show the plane, loading the texture first if needed.
    ///
    /// While the load is in flight the request is remembered and completed
    /// by [`poll`](BackdropController::poll); this returns `true` in that
    /// case. Returns `false` once setup has failed.
    fn enable(&mut self) -> bool {
        if self.enabled {
            return true;
        }
        match self.initialize() {
            InitStatus::Failed => {
                error!("liquid backdrop could not be enabled: setup failed");
                self.enable_pending = false;
                false
            }
            InitStatus::Pending => {
                debug!("liquid enable deferred until texture loads");
                self.enable_pending = true;
                true
            }
            InitStatus::Ready => {
                self.enable_pending = true;
                self.poll();
                true
            }
        }
    }

    fn disable(&mut self) {
        self.enable_pending = false;
        if !self.enabled {
            return;
        }
        self.enabled = false;
        if let Some(plane) = self.plane.as_mut() {
            plane.disable();
        }
        info!("liquid backdrop disabled");
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
