//! Migrate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_settings, open_migrator};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let migrator = open_migrator(&settings)?;

    let report = match &args.to {
        Some(to) => migrator
            .migrate(to)
            .with_context(|| format!("Migration to {to} failed"))?,
        None => migrator.migrate_latest().context("Migration failed")?,
    };

    let target = report
        .target
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    for name in &report.applied {
        println!("  ↑ {name}");
    }
    for name in &report.reverted {
        println!("  ↓ {name}");
    }
    if !report.blocked.is_empty() {
        println!(
            "{} migration(s) above {target} left in place; pass --allow-downgrade to revert them",
            report.blocked.len()
        );
        return Ok(());
    }

    if report.is_noop() {
        println!("Already at {target}");
    } else {
        println!(
            "Migrated to {target}: {} applied, {} reverted",
            report.applied.len(),
            report.reverted.len()
        );
    }
    Ok(())
}
