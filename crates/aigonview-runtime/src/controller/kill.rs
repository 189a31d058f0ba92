//! `kill`: stop recorded viewers and drop their records.

use std::io;

use aigonview_core::{LifecycleError, record_path};
use tracing::{debug, info, warn};

use super::{KillFailure, KillOutcome, KillSummary, KillTarget, LifecycleController, StoppedInstance};
use super::discard_record;
use crate::pidfile::{RecordFile, list_records, record_exists};
use crate::process::terminate_pid;

impl LifecycleController<'_> {
    /// Stop the viewer on one port, or every recorded viewer.
    ///
    /// Each target gets SIGTERM, then SIGKILL if it outlives the termination
    /// grace. A process that is already gone counts as stopped. Signal
    /// failures are collected in the summary and do not stop the batch.
    /// Every targeted record is deleted whatever the outcome, so a viewer
    /// that cannot be killed is still dropped from tracking.
    pub async fn kill(&self, target: KillTarget) -> Result<KillOutcome, LifecycleError> {
        let instance_dir = self.ctx.instance_dir();

        let targets = match target {
            KillTarget::Port(port) => {
                let path = record_path(&instance_dir.path, port);
                if !record_exists(&path) {
                    return Ok(KillOutcome::NoRecordForPort(port));
                }
                vec![RecordFile { port, path }]
            }
            KillTarget::All => {
                let all = list_records(&instance_dir.path)?;
                if all.is_empty() {
                    return Ok(KillOutcome::NoViewers);
                }
                all
            }
        };

        let mut summary = KillSummary::default();
        for record in &targets {
            self.kill_one(record, &mut summary).await;
            discard_record(&record.path);
        }

        info!(
            killed = summary.killed(),
            failed = summary.failed(),
            "Kill finished"
        );
        Ok(KillOutcome::Processed(summary))
    }

    async fn kill_one(&self, record: &RecordFile, summary: &mut KillSummary) {
        let pid = match record.load() {
            Ok(instance) => instance.pid,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(port = %record.port, "Instance record vanished before it was read");
                return;
            }
            Err(e) => {
                warn!(path = %record.path.display(), error = %e, "Invalid instance record");
                summary.failures.push(KillFailure {
                    port: record.port,
                    pid: None,
                    reason: format!("invalid PID file format: {e}"),
                });
                return;
            }
        };

        let grace = self.ctx.grace;
        match terminate_pid(pid, grace.term, grace.kill).await {
            Ok(termination) => {
                debug!(port = %record.port, pid = %pid, ?termination, "Viewer stopped");
                summary.stopped.push(StoppedInstance {
                    port: record.port,
                    pid,
                    termination,
                });
            }
            Err(e) => {
                warn!(port = %record.port, pid = %pid, error = %e, "Failed to stop viewer");
                summary.failures.push(KillFailure {
                    port: record.port,
                    pid: Some(pid),
                    reason: e.to_string(),
                });
            }
        }
    }
}
