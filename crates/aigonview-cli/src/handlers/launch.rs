//! Launch command handler.

use std::process::ExitCode;

use anyhow::Result;

use aigonview_core::LifecycleError;
use aigonview_runtime::{LaunchOutcome, LaunchPlan, LaunchRequest, LifecycleController, viewer_url};

use crate::bootstrap::CliConfig;
use crate::commands::LaunchArgs;
use crate::error::CliError;

/// Execute the launch command.
///
/// A viewer already owning the chosen port is reported as a warning with
/// exit status 1, not as an error.
pub async fn execute(config: &CliConfig, args: &LaunchArgs) -> Result<ExitCode> {
    let ctx = config.context_for(args.directory.as_deref())?;
    let controller = LifecycleController::new(&ctx);
    let request = args.to_request();

    let plan = match controller.prepare_launch(&request) {
        Ok(plan) => plan,
        Err(LifecycleError::AlreadyRunning { port, pid }) => {
            println!("⚠️  Viewer already running on port {port} (PID {pid})");
            println!("🌐 URL: {}", viewer_url(&request.host, port));
            println!("💡 Use 'aigonviewer kill --port {port}' to stop it");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(CliError::from(e).into()),
    };

    print!("{}", render_plan(&plan, &request));

    let outcome = controller.start(&plan, &request).await.map_err(CliError::from)?;
    print!("{}", render_outcome(&outcome, &request));
    Ok(ExitCode::SUCCESS)
}

/// Messages shown before the viewer is spawned.
fn render_plan(plan: &LaunchPlan, request: &LaunchRequest) -> String {
    let mut out = String::new();

    if plan.port_changed() {
        out.push_str(&format!(
            "ℹ️  Port {} in use, using port {} instead\n",
            plan.requested_port, plan.port
        ));
    }
    if let Some(pid) = plan.cleared_stale {
        out.push_str(&format!("🧹 Removed stale PID file (PID {pid} not running)\n"));
    }
    if plan.cleared_malformed {
        out.push_str("🧹 Removed invalid PID file\n");
    }

    if request.foreground {
        out.push_str("🚀 Starting Aigon Viewer Server...\n");
    } else {
        out.push_str("🚀 Starting Aigon Viewer Server in background...\n");
    }
    out.push_str(&format!("📁 Serving: {}\n", plan.serve_dir.display()));
    out.push_str(&format!("🌐 URL: {}\n", viewer_url(&request.host, plan.port)));
    if request.remote {
        out.push_str("🌍 Remote sources enabled\n");
    }
    if request.foreground {
        out.push_str("\nPress Ctrl+C to stop the server\n\n");
    }
    out
}

/// Messages shown once the launch has succeeded.
fn render_outcome(outcome: &LaunchOutcome, request: &LaunchRequest) -> String {
    let mut out = String::new();

    match (outcome.pid, &outcome.record_path) {
        (Some(pid), Some(record)) => {
            out.push_str(&format!("💾 PID {pid} saved to {}\n", record.display()));
            if request.open_browser {
                out.push_str("🌍 Opening browser...\n");
            }
            out.push_str("✅ Server running in background\n");
            out.push_str(&format!(
                "💡 Use 'aigonviewer kill --port {}' to stop it\n",
                outcome.port
            ));
        }
        _ if outcome.interrupted => out.push_str("\n✅ Server stopped.\n"),
        _ => out.push_str("✅ Server exited.\n"),
    }
    out
}
