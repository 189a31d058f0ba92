//! Process handling for viewer instances.
//!
//! # Structure
//!
//! - `spawn` - Viewer command line, spawning and stderr capture
//! - `shutdown` - SIGTERM → SIGKILL escalation by PID or by `Child`

pub mod shutdown;
mod spawn;

pub use shutdown::{Termination, shutdown_child, terminate_pid};
pub use spawn::{SpawnMode, SpawnedViewer, ViewerArgs, build_command, spawn_viewer};
