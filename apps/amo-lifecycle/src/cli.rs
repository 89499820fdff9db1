//! Command line interface definition

use amo_types::ColorChoice;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// amo-lifecycle - replay and inspect add-on installation lifecycles
#[derive(Parser)]
#[command(name = "amo-lifecycle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replay and inspect add-on installation lifecycles")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Apply a file of install actions (one JSON object per line) and show the result
    Replay {
        /// Action log, `-` for stdin
        file: PathBuf,

        /// Only show this add-on
        #[arg(long, value_name = "GUID")]
        guid: Option<String>,
    },

    /// Show the user-facing message for an install error code
    Explain {
        /// Error code, e.g. ERROR_CORRUPT_FILE
        code: String,
    },
}
