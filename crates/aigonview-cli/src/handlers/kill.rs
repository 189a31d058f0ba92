//! Kill command handler.

use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use aigonview_runtime::{KillOutcome, KillTarget, LifecycleController, Termination};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Execute the kill command.
///
/// `--port` takes precedence over `--all`; without either, every recorded
/// viewer is targeted. Exits 0 when at least one viewer was stopped.
pub async fn execute(
    config: &CliConfig,
    directory: Option<&str>,
    port: Option<u16>,
    all: bool,
) -> Result<ExitCode> {
    if all && port.is_some() {
        debug!("--port given, ignoring --all");
    }

    let ctx = config.context_for(directory)?;
    let outcome = LifecycleController::new(&ctx)
        .kill(KillTarget::from_port(port))
        .await
        .map_err(CliError::from)?;

    if let KillOutcome::Processed(summary) = &outcome {
        for failure in &summary.failures {
            eprintln!("❌ Port {}: {}", failure.port, failure.reason);
        }
    }
    print!("{}", render(&outcome));

    Ok(if outcome.killed() > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render(outcome: &KillOutcome) -> String {
    match outcome {
        KillOutcome::NoRecordForPort(port) => format!("⚠️  No viewer running on port {port}\n"),
        KillOutcome::NoViewers => "⚠️  No viewers running\n".to_string(),
        KillOutcome::Processed(summary) => {
            let mut out = String::new();
            for stopped in &summary.stopped {
                let line = match stopped.termination {
                    Termination::AlreadyGone => {
                        format!("⚠️  Process {} not found (already stopped)\n", stopped.pid)
                    }
                    Termination::Graceful => format!(
                        "✅ Stopped viewer on port {} (PID {})\n",
                        stopped.port, stopped.pid
                    ),
                    Termination::Forced => format!(
                        "✅ Force killed viewer on port {} (PID {})\n",
                        stopped.port, stopped.pid
                    ),
                };
                out.push_str(&line);
            }
            out.push_str(&format!("💾 Stopped {} viewer(s)\n", summary.killed()));
            out
        }
    }
}
