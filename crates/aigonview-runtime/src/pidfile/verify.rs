//! Liveness probe for recorded PIDs.

/// Check if `pid` currently names a process we may signal.
///
/// Uses `kill` with the null signal, which checks existence without
/// delivering anything. Any failure counts as "not running", including
/// `EPERM`: a viewer we started is always signalable by us, so a process we
/// cannot signal is not one of ours.
///
/// PID 0 (the caller's process group) and PIDs outside the platform range
/// are never running.
#[cfg(unix)]
pub fn is_running(pid: u32) -> bool {
    use nix::sys::signal;
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    if raw == 0 {
        return false;
    }

    signal::kill(Pid::from_raw(raw), None).is_ok()
}

#[cfg(not(unix))]
pub fn is_running(_pid: u32) -> bool {
    false // Not implemented on non-Unix
}
