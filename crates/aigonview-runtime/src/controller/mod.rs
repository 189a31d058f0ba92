//! Lifecycle controller: `launch`, `status` and `kill`.
//!
//! The instance directory is shared, unlocked state. Two `launch` calls can
//! both pass the record check before either writes; because each re-probes
//! the port, the worst case is two viewers on different ports, never two on
//! the same one. Every read path treats a record that disappears mid-way as
//! absent, and every delete is idempotent.

mod kill;
mod launch;
mod status;
mod types;

use std::io;
use std::path::Path;

use aigonview_core::ViewerContext;
use tracing::{debug, warn};

use crate::pidfile::{is_running, read_record, remove_record};

pub use launch::viewer_url;
pub use types::{
    KillFailure, KillOutcome, KillSummary, KillTarget, LaunchOutcome, LaunchPlan, LaunchRequest,
    LiveInstance, StatusReport, StoppedInstance,
};

/// Drives viewer instances for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleController<'a> {
    ctx: &'a ViewerContext,
}

impl<'a> LifecycleController<'a> {
    pub const fn new(ctx: &'a ViewerContext) -> Self {
        Self { ctx }
    }

    pub const fn context(&self) -> &'a ViewerContext {
        self.ctx
    }
}

/// What a record on disk turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    Live(u32),
    Dead(u32),
    /// Unparsable or unreadable content.
    Malformed,
    /// Deleted by someone else between listing and reading.
    Vanished,
}

impl RecordState {
    const fn is_stale(self) -> bool {
        matches!(self, Self::Dead(_) | Self::Malformed)
    }
}

fn inspect_record(path: &Path) -> RecordState {
    match read_record(path) {
        Ok(pid) if is_running(pid) => RecordState::Live(pid),
        Ok(pid) => RecordState::Dead(pid),
        Err(e) if e.kind() == io::ErrorKind::NotFound => RecordState::Vanished,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Unreadable instance record");
            RecordState::Malformed
        }
    }
}

/// Delete a record, logging rather than failing.
fn discard_record(path: &Path) {
    if let Err(e) = remove_record(path) {
        warn!(path = %path.display(), error = %e, "Failed to remove instance record");
    }
}
