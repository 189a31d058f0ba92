//! Path utilities for the instance directory and served directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No terminal I/O - adapters decide what to print
//! - OS-specific candidate lists are kept in `platform`

mod ensure;
mod error;
mod instance_dir;
mod platform;

// Error type
pub use error::PathError;

// Platform detection and user paths
pub use platform::{HostPlatform, host_candidates, normalize_user_path};

// Instance directory
pub use instance_dir::{
    InstanceDirResolution, InstanceDirSource, resolve_instance_dir, select_instance_dir,
};

// Directory operations
pub use ensure::{WRITE_PROBE_FILE, ensure_writable_dir, verify_writable};
