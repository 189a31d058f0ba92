//! Shared fixtures for lifecycle integration tests.
//!
//! Each test gets its own served directory and instance directory under a
//! temp root, so tests never see each other's records or the user's real
//! instance directory.

#![allow(dead_code)]

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aigonview_core::record::parse_record_file_name;
use aigonview_core::{GracePeriods, ViewerCommand, ViewerContext};
use aigonview_runtime::{LaunchRequest, is_running};
use tempfile::TempDir;

/// Grace periods short enough to keep the suite fast.
pub const FAST: GracePeriods = GracePeriods {
    startup: Duration::from_millis(300),
    term: Duration::from_millis(200),
    kill: Duration::from_millis(100),
};

pub struct Sandbox {
    _root: TempDir,
    pub serve_dir: PathBuf,
    pub pid_dir: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let serve_dir = root.path().join("notes");
        let pid_dir = root.path().join("pids");
        fs::create_dir_all(&serve_dir).expect("create serve dir");
        Self {
            _root: root,
            serve_dir,
            pid_dir,
        }
    }

    pub fn context(&self, viewer: ViewerCommand) -> ViewerContext {
        ViewerContext::new(&self.serve_dir)
            .with_pid_dir(Some(self.pid_dir.clone()))
            .with_viewer(viewer)
            .with_grace(FAST)
    }

    /// Ports of all record files currently in the instance directory.
    pub fn recorded_ports(&self) -> Vec<u16> {
        record_ports(&self.pid_dir)
    }
}

pub fn record_ports(dir: &Path) -> Vec<u16> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut ports: Vec<u16> = entries
        .flatten()
        .filter_map(|e| parse_record_file_name(&e.file_name().to_string_lossy()))
        .collect();
    ports.sort_unstable();
    ports
}

/// Viewer stand-in that ignores its arguments and stays up.
pub fn idle_viewer() -> ViewerCommand {
    ViewerCommand::new("sh").with_leading_args(["-c", "exec sleep 30", "viewer"])
}

/// Viewer stand-in that ignores SIGTERM and only dies to SIGKILL.
pub fn stubborn_viewer() -> ViewerCommand {
    ViewerCommand::new("sh").with_leading_args(["-c", "trap '' TERM; exec sleep 30", "viewer"])
}

/// Viewer stand-in that complains on stderr and exits.
pub fn crashing_viewer() -> ViewerCommand {
    ViewerCommand::new("sh").with_leading_args(["-c", "echo 'boom: cannot bind' >&2; exit 3", "viewer"])
}

/// Viewer stand-in that exits cleanly right away.
pub fn finishing_viewer() -> ViewerCommand {
    ViewerCommand::new("sh").with_leading_args(["-c", "exit 0", "viewer"])
}

/// A port that was free a moment ago.
pub fn free_port() -> u16 {
    TcpListener::bind(("127.0.0.1", 0))
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("bind ephemeral port")
}

/// PID of a process that has already exited and been reaped.
pub fn dead_pid() -> u32 {
    let mut child = std::process::Command::new("true")
        .spawn()
        .expect("spawn true");
    let pid = child.id();
    child.wait().expect("wait true");
    pid
}

pub fn request(port: u16) -> LaunchRequest {
    LaunchRequest {
        port,
        open_browser: false,
        ..LaunchRequest::default()
    }
}

/// Poll until `pid` is no longer running, for at most `limit`.
///
/// A killed viewer stays a zombie until the runtime reaps it.
pub async fn wait_until_gone(pid: u32, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while is_running(pid) {
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    true
}
