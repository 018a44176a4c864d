//! Pending command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, PendingArgs};
use crate::commands::common::{load_settings, open_migrator, resolve_target};

/// Execute the pending command
pub(crate) fn execute(args: &PendingArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let migrator = open_migrator(&settings)?;

    let Some(target) = resolve_target(&migrator, args.to.as_deref())? else {
        println!("(none found)");
        return Ok(());
    };
    let pending = migrator
        .pending(&target)
        .with_context(|| format!("Failed to list migrations up to {target}"))?;

    if pending.is_empty() {
        println!("Nothing to apply up to {target}");
        return Ok(());
    }
    for file in &pending {
        println!("  {}  {}", file.version, file.up_path);
    }
    println!();
    println!("{} pending up to {target}", pending.len());
    Ok(())
}
