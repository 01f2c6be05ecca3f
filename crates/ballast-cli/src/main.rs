//! Ballast CLI - Debt and portfolio insights from a financial snapshot
//!
//! Usage:
//!   ballast report --snapshot FILE     Ranked insights, metrics and payoff plans
//!   ballast payoff --db FILE           Avalanche vs. snowball
//!   ballast import --snapshot FILE --db FILE
//!   ballast config show                Effective settings

mod cli;
mod commands;


use anyhow::{Context, Result};
use ballast_core::Settings;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Report { source } => commands::cmd_report(&source, &load_settings()?),
        Commands::Metrics { source } => commands::cmd_metrics(&source, &load_settings()?),
        Commands::Payoff { source } => commands::cmd_payoff(&source, &load_settings()?),
        Commands::Import { snapshot, db } => commands::cmd_import(&snapshot, &db),
        Commands::Config { action } => match action {
            Some(ConfigAction::Path) => commands::cmd_config_path(),
            None | Some(ConfigAction::Show) => commands::cmd_config_show(),
        },
    }
}

fn load_settings() -> Result<Settings> {
    Settings::load().context("Failed to load settings")
}
