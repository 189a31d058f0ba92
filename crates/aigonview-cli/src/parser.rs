//! Root CLI parser and argument normalisation.

use std::ffi::OsString;

use clap::Parser;

use crate::commands::Commands;

/// Subcommand names recognised in first position.
const SUBCOMMANDS: &[&str] = &["launch", "status", "kill", "help"];

/// Launch and manage local Aigon markdown viewer servers.
///
/// Running without a subcommand launches a viewer for the current directory.
#[derive(Parser, Debug)]
#[command(name = "aigonviewer")]
#[command(about = "Launch and manage local Aigon markdown viewer servers")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Directory for PID files, tried before the platform locations
    #[arg(long = "pid-dir", global = true, env = "AIGONVIEWER_PID_DIR", value_name = "DIR")]
    pub pid_dir: Option<String>,

    /// Exit with status 3 unless the installed version equals VERSION
    #[arg(long = "assert-version", hide = true, value_name = "VERSION")]
    pub assert_version: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Rewrite `aigonviewer DIR ...` into `aigonviewer launch DIR ...`.
///
/// Only the first argument after the program name is inspected: if it is not
/// a flag and not a subcommand name, `launch` is inserted in front of it.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let needs_launch = args.get(1).is_some_and(|first| {
        let first = first.to_string_lossy();
        !first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_ref())
    });
    if needs_launch {
        args.insert(1, OsString::from("launch"));
    }
    args
}
