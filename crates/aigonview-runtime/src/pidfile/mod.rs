//! Instance record management for tracking viewer processes.
//!
//! Provides atomic record I/O and the liveness probe used to tell live
//! records from stale ones.
//!
//! # Safety guarantees
//! - Atomic writes via temp file + rename
//! - Idempotent deletes, so concurrent cleanups never fail each other
//! - Unknown files in the instance directory are never touched

mod io;
mod verify;

pub use io::{RecordFile, list_records, read_record, record_exists, remove_record, write_record};
pub use verify::is_running;
