//! Instance record I/O.
//!
//! Format: the decimal PID, nothing else. The port lives in the file name
//! (`fileserver.<port>.pid`).
//!
//! Every function here tolerates other invocations touching the same files
//! concurrently: a record that vanishes between listing and reading shows up
//! as `NotFound`, and deleting an already-deleted record succeeds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use aigonview_core::record::{InstanceRecord, parse_pid, parse_record_file_name};

/// A record file found in the instance directory (content not read yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub port: u16,
    pub path: PathBuf,
}

impl RecordFile {
    /// Read the PID and pair it with this file's port.
    pub fn load(&self) -> io::Result<InstanceRecord> {
        Ok(InstanceRecord {
            port: self.port,
            pid: read_record(&self.path)?,
            path: self.path.clone(),
        })
    }
}

/// Write the record at `path` atomically using temp file + rename.
///
/// # Atomicity
/// 1. Write to `<name>.<writer pid>.tmp`
/// 2. Rename over `<name>` (atomic on Unix/macOS)
///
/// Readers therefore see either the old PID, the new PID, or no file.
pub fn write_record(path: &Path, pid: u32) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "record path has no file name"))?;
    let temp_path = path.with_file_name(format!("{file_name}.{}.tmp", process::id()));

    fs::write(&temp_path, pid.to_string())?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

/// Read the PID stored at `path`.
///
/// Malformed content is reported as `InvalidData`; a missing file as
/// `NotFound`.
pub fn read_record(path: &Path) -> io::Result<u32> {
    let content = fs::read_to_string(path)?;
    parse_pid(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Whether a record exists at `path`.
pub fn record_exists(path: &Path) -> bool {
    path.is_file()
}

/// Delete the record at `path` (idempotent - no error if missing).
pub fn remove_record(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// List all record files in `dir`, sorted by port.
///
/// Files whose names are not `fileserver.<port>.pid` are ignored, which
/// covers in-flight temp files. A missing directory yields an empty list.
pub fn list_records(dir: &Path) -> io::Result<Vec<RecordFile>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut results = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();

        let Some(port) = path
            .file_name()
            .and_then(|s| s.to_str())
            .and_then(parse_record_file_name)
        else {
            continue;
        };

        if path.is_file() {
            results.push(RecordFile { port, path });
        }
    }

    results.sort_by_key(|r| r.port);
    Ok(results)
}
