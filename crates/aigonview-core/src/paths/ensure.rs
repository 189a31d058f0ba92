//! Create an instance directory candidate and prove it accepts writes.

use std::fs::{self, OpenOptions};
use std::path::Path;

use super::error::PathError;

/// Name of the zero-byte probe file used by [`verify_writable`].
pub const WRITE_PROBE_FILE: &str = ".write_test";

/// Create `path` (including parents) if missing and verify it is writable.
pub fn ensure_writable_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() && !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing an empty probe file.
///
/// Both steps must succeed: a directory where the probe cannot be removed
/// would accumulate junk and is rejected.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(WRITE_PROBE_FILE);
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;

    fs::remove_file(&probe).map_err(not_writable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_parents() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("pids");

        ensure_writable_dir(&nested).unwrap();

        assert!(nested.is_dir());
        assert!(!nested.join(WRITE_PROBE_FILE).exists());
    }

    #[test]
    fn rejects_regular_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();

        let err = ensure_writable_dir(&file).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }

    #[test]
    fn rejects_path_below_regular_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("blocker");
        fs::write(&file, b"x").unwrap();

        let err = ensure_writable_dir(&file.join("pids")).unwrap_err();
        assert!(matches!(err, PathError::CreateFailed { .. }));
    }
}
