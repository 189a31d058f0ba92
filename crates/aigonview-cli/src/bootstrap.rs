//! CLI bootstrap: settings shared by every command, and logging setup.
//!
//! Each handler asks [`CliConfig::context_for`] for the context of its
//! directory argument; the context is built once and passed by reference.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use aigonview_core::ViewerContext;
use aigonview_core::ViewerCommand;
use aigonview_core::paths::normalize_user_path;

use crate::error::CliError;
use crate::parser::Cli;

/// Settings that do not depend on the subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Instance directory override from `--pid-dir` / `AIGONVIEWER_PID_DIR`.
    pub pid_dir: Option<PathBuf>,
    /// Viewer server invocation.
    pub viewer: ViewerCommand,
}

impl CliConfig {
    /// Build from parsed arguments and the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let pid_dir = cli
            .pid_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(normalize_user_path)
            .transpose()
            .context("Invalid --pid-dir")?;

        Ok(Self {
            pid_dir,
            viewer: ViewerCommand::from_env(),
        })
    }

    /// Context for a command's directory argument (default: working directory).
    pub fn context_for(&self, directory: Option<&str>) -> Result<ViewerContext> {
        let ctx = ViewerContext::for_directory(directory).context("Failed to resolve directory")?;
        Ok(ctx
            .with_pid_dir(self.pid_dir.clone())
            .with_viewer(self.viewer.clone()))
    }
}

/// Fail with [`CliError::VersionMismatch`] unless `expected` is this build's version.
pub fn check_version(expected: &str) -> Result<(), CliError> {
    let installed = env!("CARGO_PKG_VERSION");
    if expected == installed {
        Ok(())
    } else {
        Err(CliError::VersionMismatch {
            installed: installed.to_string(),
            expected: expected.to_string(),
        })
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or
/// everything from debug up with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
