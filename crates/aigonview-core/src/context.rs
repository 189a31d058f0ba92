//! Per-invocation configuration.
//!
//! A [`ViewerContext`] is built once by the front end and passed by reference
//! to the lifecycle controller. Nothing in here is global or mutated after
//! construction.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::{InstanceDirResolution, PathError, normalize_user_path, resolve_instance_dir};

/// Default port requested by `launch`.
pub const DEFAULT_PORT: u16 = 4444;

/// Default bind host passed to the viewer.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Number of consecutive ports probed before giving up.
pub const DEFAULT_PORT_ATTEMPTS: u16 = 100;

/// Wait after a background spawn before checking the child is still alive.
pub const STARTUP_GRACE: Duration = Duration::from_secs(2);

/// Wait after SIGTERM before escalating to SIGKILL.
pub const TERM_GRACE: Duration = Duration::from_secs(1);

/// Wait after SIGKILL before moving on.
pub const KILL_GRACE: Duration = Duration::from_millis(500);

/// Environment variable naming the viewer server program.
pub const SERVER_BIN_ENV: &str = "AIGONVIEWER_SERVER_BIN";

/// Viewer server program used when [`SERVER_BIN_ENV`] is unset.
pub const DEFAULT_SERVER_BIN: &str = "aigonviewer_raw";

/// Environment variable the viewer reads its served directory from.
pub const SERVE_DIR_ENV: &str = "FILEDB_SERVE_DIR";

/// The bounded waits used by `launch` and `kill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePeriods {
    pub startup: Duration,
    pub term: Duration,
    pub kill: Duration,
}

impl Default for GracePeriods {
    fn default() -> Self {
        Self {
            startup: STARTUP_GRACE,
            term: TERM_GRACE,
            kill: KILL_GRACE,
        }
    }
}

/// How to start the viewer server.
///
/// The viewer is invoked as
/// `<program> <leading_args...> --directory <dir> --port <port> --host <host> [--remote] --no-browser`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerCommand {
    pub program: OsString,
    pub leading_args: Vec<OsString>,
}

impl ViewerCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.leading_args = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        self
    }

    /// Pick the program from an optional override value.
    pub fn from_override(value: Option<OsString>) -> Self {
        match value {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::new(DEFAULT_SERVER_BIN),
        }
    }

    /// Pick the program from [`SERVER_BIN_ENV`].
    pub fn from_env() -> Self {
        Self::from_override(std::env::var_os(SERVER_BIN_ENV))
    }
}

impl Default for ViewerCommand {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_BIN)
    }
}

/// Everything one invocation needs to know about where and how to work.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    /// Absolute directory being served (or used as context by status/kill).
    pub serve_dir: PathBuf,
    /// Preferred instance directory, tried before the platform locations.
    pub pid_dir_override: Option<PathBuf>,
    /// Viewer server invocation.
    pub viewer: ViewerCommand,
    /// Grace periods for startup and termination.
    pub grace: GracePeriods,
    /// Width of the port search window.
    pub port_attempts: u16,
}

impl ViewerContext {
    /// Context for an already-absolute served directory with default settings.
    pub fn new(serve_dir: impl Into<PathBuf>) -> Self {
        Self {
            serve_dir: serve_dir.into(),
            pid_dir_override: None,
            viewer: ViewerCommand::default(),
            grace: GracePeriods::default(),
            port_attempts: DEFAULT_PORT_ATTEMPTS,
        }
    }

    /// Context for a user-supplied directory, defaulting to the working directory.
    ///
    /// The path is made absolute and canonicalized when it exists.
    pub fn for_directory(directory: Option<&str>) -> Result<Self, PathError> {
        let raw = match directory {
            Some(dir) => normalize_user_path(dir)?,
            None => std::env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?,
        };
        let serve_dir = raw.canonicalize().unwrap_or(raw);
        Ok(Self::new(serve_dir))
    }

    #[must_use]
    pub fn with_pid_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.pid_dir_override = dir;
        self
    }

    #[must_use]
    pub fn with_viewer(mut self, viewer: ViewerCommand) -> Self {
        self.viewer = viewer;
        self
    }

    #[must_use]
    pub const fn with_grace(mut self, grace: GracePeriods) -> Self {
        self.grace = grace;
        self
    }

    #[must_use]
    pub const fn with_port_attempts(mut self, attempts: u16) -> Self {
        self.port_attempts = attempts;
        self
    }

    /// Resolve the instance directory for this invocation.
    pub fn instance_dir(&self) -> InstanceDirResolution {
        resolve_instance_dir(self.pid_dir_override.as_deref(), &self.serve_dir)
    }

    /// Fail unless the served directory exists and is a directory.
    pub fn require_serve_dir(&self) -> Result<&Path, PathError> {
        if !self.serve_dir.exists() {
            return Err(PathError::DirectoryNotFound(self.serve_dir.clone()));
        }
        if !self.serve_dir.is_dir() {
            return Err(PathError::NotADirectory(self.serve_dir.clone()));
        }
        Ok(&self.serve_dir)
    }
}
