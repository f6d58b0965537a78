//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Topic Relay - event-triggered function invoker
#[derive(Parser, Debug)]
#[command(
    name = "topic-relay",
    author,
    version,
    about = "Topic-triggered HTTP function invoker",
    long_about = "Resolves which functions subscribe to a topic, invokes each of them \n\
                  through an HTTP gateway, and reports every outcome on a single \n\
                  result stream."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TOPIC_RELAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TOPIC_RELAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relay an NDJSON event stream from stdin
    Run(RunArgs),

    /// Dispatch a single event and print the outcomes
    Send(SendArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "relay.toml", env = "TOPIC_RELAY_CONFIG")]
    pub config: PathBuf,

    /// Override gateway base URL from configuration
    #[arg(long, env = "TOPIC_RELAY_GATEWAY")]
    pub gateway: Option<String>,

    /// Echo response bodies to stdout (overrides config when set)
    #[arg(long)]
    pub print_response: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "TOPIC_RELAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `send` command
#[derive(Parser, Debug, Clone)]
pub struct SendArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "relay.toml", env = "TOPIC_RELAY_CONFIG")]
    pub config: PathBuf,

    /// Topic to dispatch on
    #[arg(short, long)]
    pub topic: String,

    /// Message payload
    #[arg(short, long, conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the message payload from a file
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Extra request header, KEY=VALUE (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Abort in-flight invocations after this many seconds (0 = no limit)
    #[arg(long, default_value = "0")]
    pub timeout: u64,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
