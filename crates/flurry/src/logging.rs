//! Log output.
//!
//! The terminal belongs to the UI, so logs go to `flurry.log` in the data
//! directory. `FLURRY_LOG` takes an `EnvFilter` directive (default `info`).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FLURRY_LOG";

/// Install the global subscriber. Returns the log file path, or `None` when
/// no writable data directory exists (logging is then disabled).
pub fn init() -> Option<PathBuf> {
    let dir = flurry_config::data_dir()?;
    let path = dir.join("flurry.log");
    init_at(&path).then_some(path)
}

fn init_at(path: &Path) -> bool {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return false;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
