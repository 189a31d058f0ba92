//! Subcommands and their arguments.

use clap::{Args, Subcommand};

use aigonview_core::{DEFAULT_HOST, DEFAULT_PORT};
use aigonview_runtime::LaunchRequest;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch a viewer server (default command)
    Launch(LaunchArgs),

    /// Check status of running viewer servers
    Status {
        /// Directory context for the PID file location (default: current directory)
        #[arg(short = 'd', long)]
        directory: Option<String>,
    },

    /// Stop running viewer server(s)
    Kill {
        /// Directory context for the PID file location (default: current directory)
        #[arg(short = 'd', long)]
        directory: Option<String>,
        /// Kill the viewer on this port (default: kill all)
        #[arg(short, long)]
        port: Option<u16>,
        /// Kill all viewers (same as the default)
        #[arg(short, long)]
        all: bool,
    },
}

/// Arguments of `launch`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Directory to serve (default: current directory)
    pub directory: Option<String>,

    /// Port to serve on; later ports are tried if it is taken
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Run in the foreground instead of detaching (spelled `--fg`, not `-fg`)
    #[arg(long, visible_alias = "fg")]
    pub foreground: bool,

    /// Enable remote sources
    #[arg(short, long)]
    pub remote: bool,

    /// Local files only (overrides --remote)
    #[arg(short, long)]
    pub local: bool,

    /// Disable remote sources (overrides --remote)
    #[arg(long)]
    pub no_remote: bool,

    /// Don't open the browser
    #[arg(long)]
    pub no_browser: bool,
}

impl Default for LaunchArgs {
    fn default() -> Self {
        Self {
            directory: None,
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            foreground: false,
            remote: false,
            local: false,
            no_remote: false,
            no_browser: false,
        }
    }
}

impl LaunchArgs {
    /// `--local` and `--no-remote` win over `--remote`.
    pub const fn remote_enabled(&self) -> bool {
        self.remote && !self.local && !self.no_remote
    }

    pub fn to_request(&self) -> LaunchRequest {
        LaunchRequest {
            port: self.port,
            host: self.host.clone(),
            foreground: self.foreground,
            remote: self.remote_enabled(),
            open_browser: !self.no_browser,
            extra_env: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_overrides_remote() {
        let mut args = LaunchArgs {
            remote: true,
            ..LaunchArgs::default()
        };
        assert!(args.remote_enabled());

        args.local = true;
        assert!(!args.remote_enabled());

        args.local = false;
        args.no_remote = true;
        assert!(!args.to_request().remote);
    }

    #[test]
    fn default_request_matches_plain_launch() {
        let request = LaunchArgs::default().to_request();
        assert_eq!(request.port, DEFAULT_PORT);
        assert_eq!(request.host, DEFAULT_HOST);
        assert!(!request.foreground);
        assert!(!request.remote);
        assert!(request.open_browser);
    }
}
