//! Import command implementation

use std::path::Path;

use anyhow::{Context, Result};
use ballast_core::{JsonSnapshotSource, SnapshotSource, SqliteSnapshotSource};
use tracing::info;

pub fn cmd_import(snapshot_path: &Path, db_path: &Path) -> Result<()> {
    let source = JsonSnapshotSource::from_path(snapshot_path);
    let document = source
        .load_document()
        .with_context(|| format!("Failed to read snapshot: {}", snapshot_path.display()))?;

    // Stored snapshots pass the same checks as reports
    document
        .snapshot
        .validate()
        .context("Snapshot failed validation")?;

    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    let db = SqliteSnapshotSource::open(path_str).context("Failed to open database")?;

    println!(
        "📥 Importing {} into {}...",
        snapshot_path.display(),
        db_path.display()
    );
    let stats = db
        .import_document(&document)
        .context("Failed to import snapshot")?;
    info!(rows = stats.total(), "Import complete");

    println!("   Real estate:  {}", stats.real_estate);
    println!("   Stocks:       {}", stats.stocks);
    println!("   Crypto:       {}", stats.crypto);
    println!("   Retirement:   {}", stats.retirement);
    println!("   Debts:        {}", stats.debts);
    if let Some(age) = document.age {
        println!("   Age:          {}", age);
    }
    println!("✅ Imported {} records", stats.total());

    Ok(())
}
