//! Terminate a recorded viewer by PID (no `Child` handle available).

use std::io;
use std::time::Duration;

#[cfg(unix)]
use tokio::time::sleep;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

#[cfg(unix)]
use crate::pidfile::is_running;

/// How a termination request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The process was gone before the first signal.
    AlreadyGone,
    /// SIGTERM was enough.
    Graceful,
    /// SIGKILL had to be sent.
    Forced,
}

/// Stop `pid` with SIGTERM, escalating to SIGKILL.
///
/// # Strategy
/// 1. Send SIGTERM
/// 2. Wait `term_grace`, then probe liveness once
/// 3. If still alive, send SIGKILL and wait `kill_grace`
///
/// # Returns
/// - `Ok(Termination)` if the process was stopped or already gone
/// - `Err` if a signal was rejected for any reason other than `ESRCH`
pub async fn terminate_pid(pid: u32, term_grace: Duration, kill_grace: Duration) -> io::Result<Termination> {
    #[cfg(unix)]
    {
        terminate_pid_unix(pid, term_grace, kill_grace).await
    }

    #[cfg(not(unix))]
    {
        terminate_pid_windows(pid, term_grace, kill_grace).await
    }
}

#[cfg(unix)]
async fn terminate_pid_unix(pid: u32, term_grace: Duration, kill_grace: Duration) -> io::Result<Termination> {
    let raw = i32::try_from(pid)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid PID {pid}")))?;
    let nix_pid = Pid::from_raw(raw);

    // Phase 1: SIGTERM
    match signal::kill(nix_pid, Signal::SIGTERM) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return Ok(Termination::AlreadyGone),
        Err(e) => return Err(io::Error::other(e)),
    }

    sleep(term_grace).await;
    if !is_running(pid) {
        return Ok(Termination::Graceful);
    }

    // Phase 2: SIGKILL
    match signal::kill(nix_pid, Signal::SIGKILL) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return Ok(Termination::Graceful),
        Err(e) => return Err(io::Error::other(e)),
    }

    sleep(kill_grace).await;
    Ok(Termination::Forced)
}

#[cfg(not(unix))]
async fn terminate_pid_windows(
    _pid: u32,
    _term_grace: Duration,
    _kill_grace: Duration,
) -> io::Result<Termination> {
    // No signal delivery without a Child handle on Windows
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "terminating by PID is not implemented on Windows",
    ))
}
