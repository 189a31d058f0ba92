//! Graceful process shutdown for viewer instances.
//!
//! Provides two shutdown strategies:
//! - `terminate_pid`: For background viewers known only by their recorded PID
//! - `shutdown_child`: For a foreground viewer we still own (includes reaping)

mod child;
mod pid;

pub use child::shutdown_child;
pub use pid::{Termination, terminate_pid};
