//! Error types for ld-migrate

use ld_core::CoreError;
use ld_db::DbError;
use thiserror::Error;

/// Migration engine errors.
///
/// Every variant that wraps a lower-level error names the operation that
/// produced it.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Malformed target version or migration file name (M001).
    #[error("[M001] {op} failed: {source}")]
    Parse {
        op: &'static str,
        source: CoreError,
    },

    /// Bookkeeping table could not be checked or created (M002).
    #[error("[M002] {op} failed: {source}")]
    Construction {
        op: &'static str,
        source: DbError,
    },

    /// An applied script was edited after it was recorded (M003).
    #[error("[M003] Corrupted migration {path}: stored checksum {stored} does not match {computed}")]
    Corruption {
        path: String,
        stored: String,
        computed: String,
    },

    /// Downgrade is enabled but a script has no down counterpart (M004).
    #[error("[M004] Down script {path} is missing and downgrade is enabled")]
    MissingDownScript { path: String },

    /// A migration script failed to execute (M005).
    #[error("[M005] {op} {migration} failed: {source}")]
    Execution {
        op: &'static str,
        migration: String,
        source: DbError,
    },

    /// Bookkeeping query or write failed (M006).
    #[error("[M006] {op} failed: {source}")]
    Store {
        op: &'static str,
        source: DbError,
    },

    /// A script could not be listed or read from the source tree (M007).
    #[error("[M007] {op} failed: {source}")]
    Source {
        op: &'static str,
        source: CoreError,
    },

    /// COMMIT failed; the error also carries any rollback failure (M008).
    #[error("[M008] Commit migrations failed: {source}")]
    Commit { source: DbError },

    /// The migration failed and rolling it back failed as well (M009).
    #[error("[M009] {cause}; rollback also failed: {rollback}")]
    Rollback {
        #[source]
        cause: Box<MigrateError>,
        rollback: DbError,
    },

    /// The source tree holds no migration files (M010).
    #[error("[M010] No migrations found")]
    NoMigrations,
}

impl MigrateError {
    /// Classify a catalog failure: parse errors stay parse errors, anything
    /// else is a source error.
    pub(crate) fn from_catalog(op: &'static str, source: CoreError) -> Self {
        if source.is_parse_error() {
            MigrateError::Parse { op, source }
        } else {
            MigrateError::Source { op, source }
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
