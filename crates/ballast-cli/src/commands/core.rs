//! Shared utilities for the snapshot commands
//!
//! This module contains:
//! - `open_source` - Resolve `--snapshot` / `--db` / settings to a snapshot source
//! - `load_inputs` - Load the snapshot and resolve the age
//! - `build_report` - Run the engine with the configured retirement age

use std::path::Path;

use anyhow::{bail, Context, Result};
use ballast_core::{
    InsightEngine, InsightsReport, JsonSnapshotSource, ReportBuilder, Settings, Snapshot,
    SnapshotSource, SqliteSnapshotSource,
};
use tracing::debug;

use crate::cli::SourceArgs;

/// Open an existing SQLite snapshot database
pub fn open_db(db_path: &Path) -> Result<SqliteSnapshotSource> {
    if !db_path.exists() {
        bail!(
            "Database not found: {} (create one with `ballast import`)",
            db_path.display()
        );
    }
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    SqliteSnapshotSource::open(path_str).context("Failed to open database")
}

/// Pick the snapshot source: `--db`, then `--snapshot`, then the settings default
pub fn open_source(args: &SourceArgs, settings: &Settings) -> Result<Box<dyn SnapshotSource>> {
    if let Some(db_path) = &args.db {
        return Ok(Box::new(open_db(db_path)?));
    }

    let path = args
        .snapshot
        .as_ref()
        .or(settings.default_snapshot.as_ref());
    match path {
        Some(path) => Ok(Box::new(JsonSnapshotSource::from_path(path))),
        None => bail!(
            "No snapshot given. Pass --snapshot or --db, or set default_snapshot in settings \
             (see `ballast config path`)"
        ),
    }
}

/// Load the snapshot and resolve the age.
///
/// Age precedence: `--age` > snapshot source > settings (which already folds in `BALLAST_AGE`).
pub fn load_inputs(args: &SourceArgs, settings: &Settings) -> Result<(Snapshot, Option<u32>)> {
    let source = open_source(args, settings)?;
    let document = source
        .load_document()
        .with_context(|| format!("Failed to load snapshot from {}", source.describe()))?;

    let age = args.age.or(document.age).or(settings.age);
    debug!(source = %source.describe(), ?age, "Snapshot loaded");

    Ok((document.snapshot, age))
}

pub fn build_report(args: &SourceArgs, settings: &Settings) -> Result<InsightsReport> {
    let (snapshot, age) = load_inputs(args, settings)?;

    ReportBuilder::with_engine(InsightEngine::with_retirement_age(settings.retirement_age))
        .age(age)
        .build(&snapshot)
        .context("Failed to analyze snapshot")
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
