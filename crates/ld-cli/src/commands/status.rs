//! Status command implementation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ld_db::MigrationRecord;
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{load_settings, open_migrator};

/// One applied migration as printed by `ladder status`.
#[derive(Debug, Serialize)]
struct StatusRow {
    scope: String,
    name: String,
    version: String,
    checksum: String,
    created_at: DateTime<Utc>,
}

impl From<MigrationRecord> for StatusRow {
    fn from(record: MigrationRecord) -> Self {
        Self {
            scope: record.scope,
            name: record.name,
            version: record.version,
            checksum: record.checksum,
            created_at: record.created_at,
        }
    }
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let migrator = open_migrator(&settings)?;
    let rows: Vec<StatusRow> = migrator
        .applied()
        .context("Failed to read applied migrations")?
        .into_iter()
        .map(StatusRow::from)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Database: {}", settings.database_label());
    if rows.is_empty() {
        println!("(none applied)");
        return Ok(());
    }

    let width = rows
        .iter()
        .map(|r| r.version.len())
        .max()
        .unwrap_or(0)
        .max("VERSION".len());
    println!("{:<width$}  {:<19}  MIGRATION", "VERSION", "APPLIED");
    for row in &rows {
        println!(
            "{:<width$}  {}  {}/{}",
            row.version,
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            row.scope,
            row.name
        );
    }
    println!();
    println!("{} applied", rows.len());
    Ok(())
}
