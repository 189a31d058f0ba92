//! Lifecycle error taxonomy.
//!
//! Stale records and per-target signal failures are not errors here: stale
//! records are repaired silently and signal failures are counted in the kill
//! summary.

use std::io;

use thiserror::Error;

use crate::paths::PathError;

/// Errors surfaced by `launch`, `status` and `kill`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Every port in the probed range was taken.
    #[error("No available ports found (tried {start}-{end})")]
    NoPortAvailable { start: u16, end: u16 },

    /// A live viewer already owns the chosen port.
    #[error("Viewer already running on port {port} (PID {pid})")]
    AlreadyRunning { port: u16, pid: u32 },

    /// The viewer could not be started or exited during the startup check.
    #[error("Server failed to start: {reason}")]
    SpawnFailed {
        reason: String,
        /// Whatever the child wrote to stderr before exiting.
        stderr: String,
    },

    /// Path resolution failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Filesystem or process I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LifecycleError {
    /// Captured diagnostics, if this error carries any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::SpawnFailed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}
