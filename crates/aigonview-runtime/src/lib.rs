//! Process runtime for aigonviewer.
//!
//! OS-facing half of the lifecycle manager: port probing, instance record
//! I/O, liveness checks, signal-based termination, viewer spawning, and the
//! [`LifecycleController`] that composes them into `launch`, `status` and
//! `kill`.
#![deny(unsafe_code)]

pub mod browser;
pub mod controller;
pub mod pidfile;
pub mod ports;
pub mod process;

pub use controller::{
    KillFailure, KillOutcome, KillSummary, KillTarget, LaunchOutcome, LaunchPlan, LaunchRequest,
    LifecycleController, LiveInstance, StatusReport, StoppedInstance, viewer_url,
};
pub use pidfile::is_running;
pub use ports::find_available_port;
pub use process::Termination;
