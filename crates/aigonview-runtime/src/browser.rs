//! Best-effort browser opening after a successful background launch.

use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Command used to open `url` on this platform.
fn opener(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open `url` in the default browser. Failures are logged and ignored.
pub fn open_browser(url: &str) {
    let result = opener(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => debug!(url, "Opened browser"),
        Ok(status) => warn!(url, %status, "Browser opener exited unsuccessfully"),
        Err(e) => warn!(url, error = %e, "Failed to open browser"),
    }
}
