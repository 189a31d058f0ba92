//! Errors from resolving the served directory and the instance directory.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// `~` was used but no home directory is known.
    #[error("Cannot expand '~': home directory unknown")]
    NoHomeDir,

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory to serve is missing.
    #[error("No such directory: {0}")]
    DirectoryNotFound(PathBuf),

    /// An instance directory candidate could not be created.
    #[error("Cannot create {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// The write probe failed in an instance directory candidate.
    #[error("Cannot write to {path}: {reason}")]
    NotWritable { path: PathBuf, reason: String },

    #[error("Empty path given")]
    EmptyPath,

    #[error("Working directory unavailable: {0}")]
    CurrentDirError(String),
}
