//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use ld_core::{Config, DirSource};
use ld_db::LadderDb;
use ld_migrate::{Migrator, MigratorOptions};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the database handle is closed.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs never prints it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Configuration with command-line overrides applied, plus the directory
/// relative paths resolve against.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Settings {
    pub(crate) fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }

    pub(crate) fn database_label(&self) -> String {
        match self.config.database_path(&self.root) {
            Some(path) => path.display().to_string(),
            None => self.config.database.clone(),
        }
    }
}

/// Load `ladder.yml` (or the `--config` file) and apply flag overrides.
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let root = PathBuf::from(&global.project_dir);
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::load_from_dir(&root).context("Failed to load ladder.yml")?,
    };
    apply_overrides(&mut config, global);
    config.validate().context("Invalid configuration")?;
    Ok(Settings { root, config })
}

fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(database) = &global.database {
        config.database = database.clone();
    }
    if let Some(dir) = &global.migrations_dir {
        config.migrations_dir = dir.clone();
    }
    if global.allow_downgrade {
        config.allow_downgrade = true;
    }
}

/// Open the configured database.
pub(crate) fn open_db(settings: &Settings) -> Result<LadderDb> {
    let db = match settings.config.database_path(&settings.root) {
        Some(path) => LadderDb::open(&path),
        None => LadderDb::open_memory(),
    };
    db.with_context(|| format!("Failed to open database {}", settings.database_label()))
}

/// Build a migrator over the configured migrations directory.
pub(crate) fn open_migrator(settings: &Settings) -> Result<Migrator<DirSource>> {
    let db = open_db(settings)?;
    let source = DirSource::new(settings.migrations_dir());
    let options = MigratorOptions {
        allow_downgrade: settings.config.allow_downgrade,
    };
    log::debug!(
        "Migrations from {}, database {}",
        settings.migrations_dir().display(),
        settings.database_label()
    );
    Migrator::new(db, source, options).context("Failed to prepare migrations table")
}

/// The explicit target, or the latest version in the catalog.
///
/// `None` when no target was given and there are no migration files.
pub(crate) fn resolve_target(
    migrator: &Migrator<DirSource>,
    to: Option<&str>,
) -> Result<Option<String>> {
    if let Some(to) = to {
        return Ok(Some(to.to_string()));
    }
    let catalog = migrator
        .catalog()
        .context("Failed to collect migrations")?;
    Ok(catalog.latest_version().map(ToString::to_string))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
