//! Command builder and stderr capture for the viewer server.
//!
//! This module handles building the viewer command line and spawning it with
//! stdout discarded and stderr written to a temporary log file.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Stdio;

use aigonview_core::{SERVE_DIR_ENV, ViewerCommand};
use tempfile::NamedTempFile;
use tokio::process::{Child, Command};
use tracing::debug;

/// What the viewer is asked to serve.
#[derive(Debug, Clone, Copy)]
pub struct ViewerArgs<'a> {
    pub serve_dir: &'a Path,
    pub host: &'a str,
    pub port: u16,
    pub remote: bool,
    pub extra_env: &'a [(OsString, OsString)],
}

/// How the viewer is attached to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Shares our terminal: stdout and stderr are inherited.
    Attached,
    /// Own process group, no stdin, stdout discarded, stderr captured.
    Detached,
}

/// A spawned viewer together with its captured stderr.
#[derive(Debug)]
pub struct SpawnedViewer {
    pub child: Child,
    /// `None` in attached mode, where stderr goes to the terminal.
    stderr_log: Option<NamedTempFile>,
}

impl SpawnedViewer {
    /// PID of the child, `None` once it has been reaped.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Everything the child wrote to stderr so far (empty when attached).
    pub fn captured_stderr(&self) -> String {
        self.stderr_log
            .as_ref()
            .and_then(|log| fs::read_to_string(log.path()).ok())
            .unwrap_or_default()
    }
}

/// Build the viewer command line.
///
/// The controller opens the browser itself, so `--no-browser` is always
/// passed.
pub fn build_command(viewer: &ViewerCommand, args: &ViewerArgs<'_>) -> Command {
    let mut cmd = Command::new(&viewer.program);
    cmd.args(&viewer.leading_args)
        .arg("--directory")
        .arg(args.serve_dir)
        .arg("--port")
        .arg(args.port.to_string())
        .arg("--host")
        .arg(args.host);

    if args.remote {
        cmd.arg("--remote");
    }
    cmd.arg("--no-browser");

    cmd.env(SERVE_DIR_ENV, args.serve_dir);
    for (key, value) in args.extra_env {
        cmd.env(key, value);
    }

    cmd
}

/// Spawn the viewer.
///
/// [`SpawnMode::Detached`] puts the child in a new process group, not a new
/// session, so it outlives us and ignores Ctrl-C aimed at our terminal.
pub fn spawn_viewer(viewer: &ViewerCommand, args: &ViewerArgs<'_>, mode: SpawnMode) -> io::Result<SpawnedViewer> {
    let mut cmd = build_command(viewer, args);

    let stderr_log = match mode {
        SpawnMode::Attached => None,
        SpawnMode::Detached => {
            let log = tempfile::Builder::new()
                .prefix("aigonviewer-")
                .suffix(".log")
                .tempfile()?;
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::from(log.reopen()?));
            #[cfg(unix)]
            cmd.process_group(0);
            Some(log)
        }
    };

    debug!(
        program = ?viewer.program,
        port = %args.port,
        ?mode,
        "Spawning viewer"
    );
    let child = cmd.spawn()?;

    Ok(SpawnedViewer { child, stderr_log })
}
