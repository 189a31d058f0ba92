//! Shutdown of a foreground viewer we still hold a `Child` handle for.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tokio::time::timeout;

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Wait for `child` to exit, escalating SIGTERM → SIGKILL if it lingers.
///
/// Used after Ctrl-C in foreground mode: the viewer shares our process
/// group and normally exits on the same interrupt, so the first step only
/// waits.
///
/// # Strategy
/// 1. Wait up to `grace` for the child to exit on its own
/// 2. Send SIGTERM and wait up to `grace` again
/// 3. Send SIGKILL and reap
///
/// # Platform behavior
/// - Unix: SIGTERM via nix, SIGKILL via `Child::kill`
/// - Windows: skips step 2
pub async fn shutdown_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    if let Ok(result) = timeout(grace, child.wait()).await {
        return result;
    }

    #[cfg(unix)]
    {
        if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
            match signal::kill(Pid::from_raw(pid), Signal::SIGTERM) {
                Ok(()) => {
                    if let Ok(result) = timeout(grace, child.wait()).await {
                        return result;
                    }
                }
                Err(nix::errno::Errno::ESRCH) => return child.wait().await,
                Err(e) => return Err(io::Error::other(e)),
            }
        }
    }

    // Child::kill sends SIGKILL on Unix and reaps
    child.kill().await?;
    child.wait().await
}
