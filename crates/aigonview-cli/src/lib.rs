//! Command-line front end for aigonviewer.
//!
//! Parses arguments, builds one [`aigonview_core::ViewerContext`] per
//! invocation, and hands it to the runtime's lifecycle controller. Handlers
//! own all user-facing output and the exit-code mapping.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary entry point only
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, check_version, init_tracing};
pub use commands::{Commands, LaunchArgs};
pub use error::CliError;
pub use parser::{Cli, normalize_args};
