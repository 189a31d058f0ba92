//! CLI entry point.
//!
//! Argument normalisation, logging setup and the version assertion happen
//! here; everything else is dispatched to a handler, whose exit code becomes
//! the process status.

use std::process::ExitCode;

use clap::Parser;

use aigonview_cli::error::report_error;
use aigonview_cli::{Cli, CliConfig, Commands, LaunchArgs, check_version, handlers, init_tracing, normalize_args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(cli.verbose);

    // Undocumented; used by wrappers that pin a viewer version
    if let Some(expected) = cli.assert_version.as_deref() {
        if let Err(e) = check_version(expected) {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    }

    let result = match CliConfig::from_cli(&cli) {
        Ok(config) => dispatch(&config, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(err) => ExitCode::from(report_error(&err)),
    }
}

async fn dispatch(config: &CliConfig, command: Option<Commands>) -> anyhow::Result<ExitCode> {
    // No command provided: launch with defaults
    let command = command.unwrap_or_else(|| Commands::Launch(LaunchArgs::default()));

    match command {
        Commands::Launch(args) => handlers::launch::execute(config, &args).await,
        Commands::Status { directory } => handlers::status::execute(config, directory.as_deref()),
        Commands::Kill {
            directory,
            port,
            all,
        } => handlers::kill::execute(config, directory.as_deref(), port, all).await,
    }
}
