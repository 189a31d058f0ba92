//! `launch`: pick a port, clear stale state, spawn the viewer, record it.

use aigonview_core::{LifecycleError, ViewerCommand, record_path};
use tokio::time::sleep;
use tracing::{info, warn};

use super::{LaunchOutcome, LaunchPlan, LaunchRequest, LifecycleController, RecordState};
use super::{discard_record, inspect_record};
use crate::browser::open_browser;
use crate::pidfile::{record_exists, write_record};
use crate::ports::{find_available_port, search_window_end};
use crate::process::{SpawnMode, SpawnedViewer, ViewerArgs, shutdown_child, spawn_viewer};

impl LifecycleController<'_> {
    /// Launch a viewer: [`Self::prepare_launch`] followed by [`Self::start`].
    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchOutcome, LifecycleError> {
        let plan = self.prepare_launch(request)?;
        self.start(&plan, request).await
    }

    /// Choose the port and clear any stale record for it.
    ///
    /// Nothing is spawned and no record is written. Fails with
    /// `NoPortAvailable` when the port window is exhausted and with
    /// `AlreadyRunning` when a live viewer owns the chosen port.
    pub fn prepare_launch(&self, request: &LaunchRequest) -> Result<LaunchPlan, LifecycleError> {
        let serve_dir = self.ctx.require_serve_dir()?.to_path_buf();

        let attempts = self.ctx.port_attempts;
        let port = find_available_port(request.port, attempts).ok_or(LifecycleError::NoPortAvailable {
            start: request.port,
            end: search_window_end(request.port, attempts),
        })?;
        if port != request.port {
            info!(requested = %request.port, port = %port, "Requested port in use");
        }

        let instance_dir = self.ctx.instance_dir();
        let record = record_path(&instance_dir.path, port);

        let mut cleared_stale = None;
        let mut cleared_malformed = false;
        if record_exists(&record) {
            match inspect_record(&record) {
                RecordState::Live(pid) => return Err(LifecycleError::AlreadyRunning { port, pid }),
                RecordState::Dead(pid) => {
                    info!(port = %port, pid = %pid, "Removing stale instance record");
                    discard_record(&record);
                    cleared_stale = Some(pid);
                }
                RecordState::Malformed => {
                    info!(path = %record.display(), "Removing malformed instance record");
                    discard_record(&record);
                    cleared_malformed = true;
                }
                RecordState::Vanished => {}
            }
        }

        Ok(LaunchPlan {
            serve_dir,
            requested_port: request.port,
            port,
            instance_dir,
            record_path: record,
            cleared_stale,
            cleared_malformed,
        })
    }

    /// Spawn the viewer for a prepared plan.
    pub async fn start(&self, plan: &LaunchPlan, request: &LaunchRequest) -> Result<LaunchOutcome, LifecycleError> {
        let args = ViewerArgs {
            serve_dir: &plan.serve_dir,
            host: &request.host,
            port: plan.port,
            remote: request.remote,
            extra_env: &request.extra_env,
        };

        if request.foreground {
            self.run_foreground(plan, request, &args).await
        } else {
            self.run_background(plan, request, &args).await
        }
    }

    /// Run the viewer attached until it exits or we are interrupted.
    ///
    /// The viewer writes straight to our terminal, so a failing exit carries
    /// no captured stderr.
    async fn run_foreground(
        &self,
        plan: &LaunchPlan,
        request: &LaunchRequest,
        args: &ViewerArgs<'_>,
    ) -> Result<LaunchOutcome, LifecycleError> {
        let mut viewer = spawn_viewer(&self.ctx.viewer, args, SpawnMode::Attached).map_err(|e| spawn_error(&self.ctx.viewer, &e))?;
        let mut outcome = LaunchOutcome {
            port: plan.port,
            pid: None,
            record_path: None,
            url: viewer_url(&request.host, plan.port),
            interrupted: false,
        };

        let status = tokio::select! {
            status = viewer.child.wait() => status?,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Interrupted, waiting for viewer to exit");
                shutdown_child(&mut viewer.child, self.ctx.grace.term).await?;
                outcome.interrupted = true;
                return Ok(outcome);
            }
        };

        if status.success() {
            Ok(outcome)
        } else {
            Err(LifecycleError::SpawnFailed {
                reason: format!("server exited with {status}"),
                stderr: viewer.captured_stderr(),
            })
        }
    }

    /// Detach the viewer, record it, and confirm it survives the startup grace.
    async fn run_background(
        &self,
        plan: &LaunchPlan,
        request: &LaunchRequest,
        args: &ViewerArgs<'_>,
    ) -> Result<LaunchOutcome, LifecycleError> {
        let mut viewer = spawn_viewer(&self.ctx.viewer, args, SpawnMode::Detached).map_err(|e| spawn_error(&self.ctx.viewer, &e))?;
        let Some(pid) = viewer.pid() else {
            return Err(LifecycleError::SpawnFailed {
                reason: "server exited before its PID was known".to_string(),
                stderr: viewer.captured_stderr(),
            });
        };

        if let Err(e) = write_record(&plan.record_path, pid) {
            let _ = viewer.child.start_kill();
            discard_record(&plan.record_path);
            return Err(e.into());
        }
        info!(pid = %pid, path = %plan.record_path.display(), "Saved instance record");

        if let Err(e) = self.confirm_started(&mut viewer).await {
            discard_record(&plan.record_path);
            return Err(e);
        }

        let url = viewer_url(&request.host, plan.port);
        if request.open_browser {
            open_browser(&url);
        }

        Ok(LaunchOutcome {
            port: plan.port,
            pid: Some(pid),
            record_path: Some(plan.record_path.clone()),
            url,
            interrupted: false,
        })
    }

    /// Wait out the startup grace period and check the child once.
    async fn confirm_started(&self, viewer: &mut SpawnedViewer) -> Result<(), LifecycleError> {
        sleep(self.ctx.grace.startup).await;

        match viewer.child.try_wait() {
            Ok(None) => Ok(()),
            Ok(Some(status)) => {
                warn!(%status, "Viewer exited during startup");
                Err(LifecycleError::SpawnFailed {
                    reason: format!("server exited during startup ({status})"),
                    stderr: viewer.captured_stderr(),
                })
            }
            Err(e) => {
                let _ = viewer.child.start_kill();
                Err(e.into())
            }
        }
    }
}

fn spawn_error(viewer: &ViewerCommand, err: &std::io::Error) -> LifecycleError {
    LifecycleError::SpawnFailed {
        reason: format!("could not run {}: {err}", viewer.program.to_string_lossy()),
        stderr: String::new(),
    }
}

/// Browser URL of a viewer bound to `host:port`.
pub fn viewer_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}
