//! Core types for the aigonviewer instance lifecycle manager.
//!
//! This crate has no process or signal handling. It defines:
//! - [`ViewerContext`]: per-invocation configuration
//! - [`LifecycleError`]: the error taxonomy of `launch`/`status`/`kill`
//! - [`paths`]: instance directory resolution
//! - [`record`]: naming and parsing of `fileserver.<port>.pid` records

pub mod context;
pub mod error;
pub mod paths;
pub mod record;

pub use context::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PORT_ATTEMPTS, GracePeriods, KILL_GRACE, SERVE_DIR_ENV,
    STARTUP_GRACE, TERM_GRACE, ViewerCommand, ViewerContext,
};
pub use error::LifecycleError;
pub use paths::{InstanceDirResolution, InstanceDirSource, PathError};
pub use record::{InstanceRecord, MalformedRecord, parse_pid, parse_record_file_name, record_path};
