//! `status`: list live viewers, deleting stale records on the way.

use aigonview_core::LifecycleError;
use tracing::info;

use super::{LifecycleController, LiveInstance, RecordState, StatusReport};
use super::{discard_record, inspect_record};
use crate::pidfile::list_records;

impl LifecycleController<'_> {
    /// Report the live viewers in the instance directory.
    ///
    /// Records naming dead processes and malformed records are deleted, so
    /// stale entries never accumulate. An empty report is not an error.
    pub fn status(&self) -> Result<StatusReport, LifecycleError> {
        let instance_dir = self.ctx.instance_dir();
        let mut live = Vec::new();
        let mut stale_removed = 0;

        for record in list_records(&instance_dir.path)? {
            let state = inspect_record(&record.path);
            match state {
                RecordState::Live(pid) => live.push(LiveInstance {
                    pid,
                    port: record.port,
                }),
                _ if state.is_stale() => {
                    info!(port = %record.port, ?state, "Removing stale instance record");
                    discard_record(&record.path);
                    stale_removed += 1;
                }
                _ => {}
            }
        }

        Ok(StatusReport {
            live,
            stale_removed,
            instance_dir,
        })
    }
}
