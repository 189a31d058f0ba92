//! Instance directory resolution.
//!
//! Picks the directory that holds `fileserver.<port>.pid` records. The
//! directory is shared by every invocation on the machine and is resolved
//! again on each invocation.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ensure::ensure_writable_dir;
use super::platform::host_candidates;

/// How the instance directory was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceDirSource {
    /// Explicit override (`--pid-dir` / `AIGONVIEWER_PID_DIR`).
    Override,
    /// One of the platform-conventional locations.
    Platform,
    /// The served directory, used as last resort.
    Fallback,
}

/// Resolution result for the instance directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDirResolution {
    /// The resolved directory.
    pub path: PathBuf,
    /// How the path was determined.
    pub source: InstanceDirSource,
}

/// Resolve the instance directory for the running host.
///
/// Resolution order:
/// 1. `override_dir`, when given
/// 2. Platform candidates (see [`super::HostPlatform::candidates`])
/// 3. `fallback`
pub fn resolve_instance_dir(override_dir: Option<&Path>, fallback: &Path) -> InstanceDirResolution {
    let mut candidates = Vec::new();
    if let Some(dir) = override_dir {
        candidates.push((dir.to_path_buf(), InstanceDirSource::Override));
    }
    candidates.extend(
        host_candidates()
            .into_iter()
            .map(|p| (p, InstanceDirSource::Platform)),
    );

    select_instance_dir(candidates, fallback)
}

/// Return the first candidate that can be created and write-tested.
///
/// `fallback` is tried last; if even that fails it is returned anyway so the
/// caller gets a usable answer rather than an error.
pub fn select_instance_dir<I>(candidates: I, fallback: &Path) -> InstanceDirResolution
where
    I: IntoIterator<Item = (PathBuf, InstanceDirSource)>,
{
    let fallback_entry = (fallback.to_path_buf(), InstanceDirSource::Fallback);

    for (path, source) in candidates.into_iter().chain(std::iter::once(fallback_entry)) {
        match ensure_writable_dir(&path) {
            Ok(()) => {
                debug!(path = %path.display(), ?source, "Using instance directory");
                return InstanceDirResolution { path, source };
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping instance directory candidate");
            }
        }
    }

    warn!(
        path = %fallback.display(),
        "No writable instance directory found, using fallback as-is"
    );
    InstanceDirResolution {
        path: fallback.to_path_buf(),
        source: InstanceDirSource::Fallback,
    }
}
