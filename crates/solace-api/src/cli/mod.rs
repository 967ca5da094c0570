//! CLI command definitions and dispatch for the `solace` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod key;
pub mod status;

use clap::{Parser, Subcommand};

/// Emotion-aware therapy chat service.
#[derive(Parser)]
#[command(name = "solace", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Bridge tracing spans to OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Manage API keys.
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },

    /// System status dashboard.
    Status,
}

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Create a new API key (the key is shown once).
    Create {
        /// Human-readable label for the key.
        name: String,
    },

    /// List stored API keys.
    #[command(alias = "ls")]
    List,
}
