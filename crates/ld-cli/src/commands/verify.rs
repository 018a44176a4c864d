//! Verify command implementation

use anyhow::Result;
use ld_migrate::MigrateError;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_settings, open_migrator, ExitCode};

/// Execute the verify command
///
/// Exits with status 2 when an applied script no longer matches its stored
/// checksum.
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let migrator = open_migrator(&settings)?;

    match migrator.verify() {
        Ok(checked) => {
            println!("✓ {checked} applied migration(s) match their scripts");
            Ok(())
        }
        Err(err @ (MigrateError::Corruption { .. } | MigrateError::MissingDownScript { .. })) => {
            eprintln!("✗ {err}");
            Err(ExitCode(2).into())
        }
        Err(err) => Err(anyhow::Error::new(err).context("Verification failed")),
    }
}
