//! Error types for ld-core

use thiserror::Error;

/// Core error type for Ladder
#[derive(Error, Debug)]
pub enum CoreError {
    /// L001: Malformed version identifier
    #[error("[L001] Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    /// L002: Migration file name does not follow `<version>_<name>_up.sql`
    #[error("[L002] Invalid migration file name '{path}': {reason}")]
    InvalidMigrationName { path: String, reason: String },

    /// L003: Source root missing
    #[error("[L003] Migration source not found: {path}")]
    SourceNotFound { path: String },

    /// L004: Entry missing from the source tree
    #[error("[L004] Migration script not found: {path}")]
    EntryNotFound { path: String },

    /// L005: IO error with file path context
    #[error("[L005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// L006: Configuration file not found
    #[error("[L006] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// L007: Invalid configuration value
    #[error("[L007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// L008: YAML parse error
    #[error("[L008] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Whether this error means "the entry does not exist" rather than
    /// "the entry exists but could not be read".
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::EntryNotFound { .. } | CoreError::SourceNotFound { .. } => true,
            CoreError::IoWithPath { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Whether this error is a parse failure (version or file name).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidVersion { .. } | CoreError::InvalidMigrationName { .. }
        )
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
