//! CLI error type and exit-code mapping.

use aigonview_core::LifecycleError;
use thiserror::Error;

/// Exit status for a failed `--assert-version` check.
///
/// Kept apart from 2, which clap uses for usage errors.
pub const EXIT_VERSION_MISMATCH: u8 = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Version mismatch: installed={installed}, expected={expected}")]
    VersionMismatch { installed: String, expected: String },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::VersionMismatch { .. } => EXIT_VERSION_MISMATCH,
            Self::Lifecycle(_) => 1,
        }
    }

    /// Captured viewer stderr, when the failure came with any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::Lifecycle(err) => err.diagnostics(),
            Self::VersionMismatch { .. } => None,
        }
    }
}

/// Print a failed command to stderr and pick its exit status.
pub fn report_error(err: &anyhow::Error) -> u8 {
    eprintln!("❌ {err:#}");

    match err.downcast_ref::<CliError>() {
        Some(cli_err) => {
            if let Some(stderr) = cli_err.diagnostics() {
                eprintln!("{stderr}");
            }
            cli_err.exit_code()
        }
        None => 1,
    }
}
