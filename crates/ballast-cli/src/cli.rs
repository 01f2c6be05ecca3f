//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Ballast - Debt and portfolio insights from a financial snapshot
#[derive(Parser)]
#[command(name = "ballast")]
#[command(about = "Offline debt payoff and portfolio health insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the snapshot from, plus output options
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// JSON snapshot file (defaults to `default_snapshot` from settings)
    #[arg(short, long, conflicts_with = "db")]
    pub snapshot: Option<PathBuf>,

    /// SQLite snapshot database
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Age for age-conditioned insights (overrides the snapshot and settings)
    #[arg(long)]
    pub age: Option<u32>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full insights report: ranked insights, metrics and payoff plans
    Report {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Portfolio metrics only
    Metrics {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Avalanche vs. snowball payoff plans
    Payoff {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Copy a JSON snapshot into a SQLite snapshot database
    Import {
        /// JSON snapshot file to import
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Database to write (created if missing, contents replaced)
        #[arg(long)]
        db: PathBuf,
    },

    /// Show settings resolution
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the override file location
    Path,
    /// Print the effective settings
    Show,
}
