//! Status command handler.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use aigonview_core::DEFAULT_HOST;
use aigonview_runtime::{LifecycleController, StatusReport, viewer_url};

use crate::bootstrap::CliConfig;

/// Execute the status command.
///
/// Always exits 0: having no viewers is not an error, and a scan failure is
/// printed but does not change the status.
pub fn execute(config: &CliConfig, directory: Option<&str>) -> Result<ExitCode> {
    let ctx = config.context_for(directory)?;

    match LifecycleController::new(&ctx).status() {
        Ok(report) => print!("{}", render(&report, &ctx.serve_dir)),
        Err(e) => eprintln!("❌ Could not read viewer status: {e}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn render(report: &StatusReport, serve_dir: &Path) -> String {
    if report.is_empty() {
        return match report.stale_removed {
            0 => "⚠️  No viewers running\n".to_string(),
            n => format!("⚠️  No viewers running (cleaned up {n} stale PID file(s))\n"),
        };
    }

    let mut out = format!("✅ {} viewer(s) running:\n", report.live.len());
    for viewer in &report.live {
        out.push_str(&format!(
            "   Port {}: PID {} - {}\n",
            viewer.port,
            viewer.pid,
            viewer_url(DEFAULT_HOST, viewer.port)
        ));
    }
    out.push_str(&format!("📁 Serving: {}\n", serve_dir.display()));
    out
}
