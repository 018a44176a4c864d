//! Error types for ld-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Unique or other constraint violated (D003)
    #[error("[D003] Constraint violated: {0}")]
    ConstraintViolation(String),

    /// BEGIN or ROLLBACK failed (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// COMMIT failed and the follow-up rollback succeeded (D005)
    #[error("[D005] Transaction commit failed: {commit}")]
    CommitFailed { commit: String },

    /// COMMIT failed and so did the follow-up rollback (D006)
    #[error("[D006] Transaction commit failed: {commit}; rollback also failed: {rollback}")]
    CommitAndRollbackFailed { commit: String, rollback: String },

    /// Stored row could not be decoded (D007)
    #[error("[D007] Invalid stored row: {0}")]
    InvalidRow(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose constraint failures as a structured
        // variant, so classify on the message.
        let msg = err.to_string();
        if matches!(err, duckdb::Error::FromSqlConversionFailure(..)) {
            DbError::InvalidRow(msg)
        } else if msg.contains("Constraint Error") || msg.contains("violates unique constraint") {
            DbError::ConstraintViolation(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_codes() {
        let err = DbError::CommitAndRollbackFailed {
            commit: "disk full".to_string(),
            rollback: "connection lost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[D006]"));
        assert!(msg.contains("disk full"));
        assert!(msg.contains("connection lost"));
    }

    #[test]
    fn test_classifies_constraint_errors() {
        let conn = duckdb::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER UNIQUE); INSERT INTO t VALUES (1);")
            .unwrap();
        let err: DbError = conn.execute("INSERT INTO t VALUES (1)", []).unwrap_err().into();
        assert!(matches!(err, DbError::ConstraintViolation(_)), "{err}");

        let err: DbError = conn.execute("SELEC 1", []).unwrap_err().into();
        assert!(matches!(err, DbError::ExecutionError(_)), "{err}");
    }
}
