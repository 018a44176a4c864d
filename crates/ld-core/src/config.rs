//! Configuration types and parsing for ladder.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// In-memory database marker accepted for `database`.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Project configuration from ladder.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the migration scripts
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// DuckDB database file (or `:memory:`)
    #[serde(default = "default_database")]
    pub database: String,

    /// Revert applied migrations above a lower target version
    #[serde(default)]
    pub allow_downgrade: bool,
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_database() -> String {
    "ladder.duckdb".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: default_database(),
            allow_downgrade: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for ladder.yml or ladder.yaml and falls back to the defaults
    /// when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("ladder.yml");
        let yaml_path = dir.join("ladder.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            log::debug!("No ladder.yml in {}, using defaults", dir.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        if self.database.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Migrations directory resolved against the project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Database location resolved against the project root, `None` for an
    /// in-memory database
    pub fn database_path(&self, root: &Path) -> Option<PathBuf> {
        if self.database == MEMORY_DATABASE {
            None
        } else {
            Some(root.join(&self.database))
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
