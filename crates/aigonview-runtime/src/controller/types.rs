//! Request and report types for the lifecycle controller.

use std::ffi::OsString;
use std::path::PathBuf;

use aigonview_core::{DEFAULT_HOST, DEFAULT_PORT, InstanceDirResolution};

use crate::process::Termination;

/// Parameters of a `launch`.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// First port to try; later ports are used if it is taken.
    pub port: u16,
    pub host: String,
    /// Block until the viewer exits instead of detaching it.
    pub foreground: bool,
    /// Enable remote sources in the viewer.
    pub remote: bool,
    /// Open the browser after a successful background launch.
    pub open_browser: bool,
    /// Extra environment for the viewer process.
    pub extra_env: Vec<(OsString, OsString)>,
}

impl Default for LaunchRequest {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            foreground: false,
            remote: false,
            open_browser: true,
            extra_env: Vec::new(),
        }
    }
}

/// Everything decided before the viewer is spawned.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub serve_dir: PathBuf,
    pub requested_port: u16,
    /// The port actually chosen.
    pub port: u16,
    pub instance_dir: InstanceDirResolution,
    /// Where the record will be written in background mode.
    pub record_path: PathBuf,
    /// PID of a stale record that was cleared for this port, if any.
    pub cleared_stale: Option<u32>,
    /// Whether a malformed record was cleared for this port.
    pub cleared_malformed: bool,
}

impl LaunchPlan {
    /// Whether the requested port was taken and a later one chosen.
    pub const fn port_changed(&self) -> bool {
        self.port != self.requested_port
    }
}

/// Result of a successful `launch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub port: u16,
    /// `None` in foreground mode: nothing is tracked across invocations.
    pub pid: Option<u32>,
    pub record_path: Option<PathBuf>,
    pub url: String,
    /// Foreground run ended by Ctrl-C.
    pub interrupted: bool,
}

/// A viewer confirmed alive by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveInstance {
    pub pid: u32,
    pub port: u16,
}

/// Result of `status`.
#[derive(Debug, Clone)]
pub struct StatusReport {
    /// Live viewers, sorted by port.
    pub live: Vec<LiveInstance>,
    /// Stale or malformed records deleted while scanning.
    pub stale_removed: usize,
    pub instance_dir: InstanceDirResolution,
}

impl StatusReport {
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Which records `kill` targets.
///
/// "Kill all" and "no port given" are the same enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillTarget {
    Port(u16),
    All,
}

impl KillTarget {
    pub const fn from_port(port: Option<u16>) -> Self {
        match port {
            Some(port) => Self::Port(port),
            None => Self::All,
        }
    }
}

/// A viewer that `kill` stopped (or found already gone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppedInstance {
    pub port: u16,
    pub pid: u32,
    pub termination: Termination,
}

/// A targeted record `kill` could not act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillFailure {
    pub port: u16,
    /// `None` when the record was malformed.
    pub pid: Option<u32>,
    pub reason: String,
}

/// Per-target results of a `kill` batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillSummary {
    pub stopped: Vec<StoppedInstance>,
    pub failures: Vec<KillFailure>,
}

impl KillSummary {
    /// Targets whose termination was confirmed or assumed.
    pub fn killed(&self) -> usize {
        self.stopped.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Result of `kill`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// A port was given and there is no record for it.
    NoRecordForPort(u16),
    /// No port was given and the instance directory holds no records.
    NoViewers,
    /// At least one record was targeted.
    Processed(KillSummary),
}

impl KillOutcome {
    pub fn killed(&self) -> usize {
        match self {
            Self::Processed(summary) => summary.killed(),
            Self::NoRecordForPort(_) | Self::NoViewers => 0,
        }
    }
}
