//! CLI command definitions for the `charla` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod index;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Streaming chat backend with document retrieval.
#[derive(Parser)]
#[command(name = "charla", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Directory holding config.toml, documents and the embedding cache.
    #[arg(long, global = true, env = "CHARLA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Build or load the embedding cache and report its size.
    Index {
        /// Ignore an existing cache and re-embed every document.
        #[arg(long)]
        rebuild: bool,
    },

    /// Send one message to a running server and print the reply as it streams.
    Ask {
        /// The message to send.
        message: String,

        /// Base URL of the server.
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        url: String,

        /// Record the exchange under this session id.
        #[arg(long)]
        session: Option<uuid::Uuid>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["charla", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, 3000);
                assert_eq!(host, "0.0.0.0");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_ask_with_globals() {
        let cli = Cli::try_parse_from(["charla", "ask", "hola", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask { message, url, session } => {
                assert_eq!(message, "hola");
                assert_eq!(url, "http://127.0.0.1:3000");
                assert!(session.is_none());
            }
            _ => panic!("expected ask"),
        }
    }
}
