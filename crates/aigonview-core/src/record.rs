//! Instance record layout.
//!
//! One record per running viewer, stored as `fileserver.<port>.pid` inside the
//! instance directory. The file body is the decimal PID and nothing else.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name prefix shared by all instance records.
pub const RECORD_PREFIX: &str = "fileserver.";

/// File extension of instance records.
pub const RECORD_EXTENSION: &str = "pid";

/// A record body that is not a PID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed instance record: {content:?}")]
pub struct MalformedRecord {
    /// The offending content, trimmed.
    pub content: String,
}

/// An instance record as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub port: u16,
    pub pid: u32,
    pub path: PathBuf,
}

/// File name for the record of `port`.
pub fn record_file_name(port: u16) -> String {
    format!("{RECORD_PREFIX}{port}.{RECORD_EXTENSION}")
}

/// Full path of the record of `port` inside `dir`.
pub fn record_path(dir: &Path, port: u16) -> PathBuf {
    dir.join(record_file_name(port))
}

/// Port encoded in a record file name, or `None` if `name` is not a record.
pub fn parse_record_file_name(name: &str) -> Option<u16> {
    name.strip_prefix(RECORD_PREFIX)?
        .strip_suffix(RECORD_EXTENSION)?
        .strip_suffix('.')
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))?
        .parse()
        .ok()
}

/// Parse a record body into a PID.
pub fn parse_pid(content: &str) -> Result<u32, MalformedRecord> {
    let trimmed = content.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedRecord {
            content: trimmed.to_string(),
        });
    }

    trimmed.parse().map_err(|_| MalformedRecord {
        content: trimmed.to_string(),
    })
}
