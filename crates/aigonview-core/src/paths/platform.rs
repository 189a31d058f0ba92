//! Platform-specific candidate locations for instance records.
//!
//! The lists below must stay stable: records written by older installs are
//! only found again if the same directories are probed in the same order.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Host operating system family, as far as path conventions go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl HostPlatform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// Ordered candidate directories for this platform.
    ///
    /// `home` is the user's home directory (home-relative entries are skipped
    /// when it is unknown) and `var` looks up environment variables.
    pub fn candidates<F>(self, home: Option<&Path>, var: F) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let shared_tmp = Path::new("/tmp").join("aigon-fileserver");
        let mut out = Vec::with_capacity(3);

        match self {
            Self::MacOs => {
                if let Some(home) = home {
                    out.push(home.join("Library/Application Support/Aigon/pids"));
                    out.push(home.join(".cache/aigon/pids"));
                }
                out.push(shared_tmp);
            }
            Self::Linux => {
                if let Some(home) = home {
                    out.push(home.join(".cache/aigon/pids"));
                    out.push(home.join(".local/share/aigon/pids"));
                }
                out.push(shared_tmp);
            }
            Self::Windows => {
                if let Some(appdata) = var("APPDATA") {
                    out.push(PathBuf::from(appdata).join("Aigon").join("pids"));
                }
                if let Some(local) = var("LOCALAPPDATA") {
                    out.push(PathBuf::from(local).join("Aigon").join("pids"));
                }
                if let Some(temp) = var("TEMP") {
                    out.push(PathBuf::from(temp).join("aigon-fileserver"));
                }
            }
            Self::Other => {
                if let Some(home) = home {
                    out.push(home.join(".cache/aigon/pids"));
                }
                if Path::new("/tmp").exists() {
                    out.push(shared_tmp);
                }
            }
        }

        out
    }
}

/// Candidate list for the running host, read from the real environment.
pub fn host_candidates() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    HostPlatform::current().candidates(home.as_deref(), |key| {
        env::var_os(key).filter(|v| !v.is_empty())
    })
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}
