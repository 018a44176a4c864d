//! DuckDB connection wrapper.
//!
//! [`LadderDb`] owns the connection the migrator runs against and hands out
//! [`Transaction`] guards on it.

use crate::error::{DbError, DbResult};
use crate::executor::Transaction;
use duckdb::Connection;
use std::path::Path;

/// Wrapper around the DuckDB connection being migrated.
///
/// Single-threaded; one migration runs at a time per handle.
pub struct LadderDb {
    conn: Connection,
}

impl LadderDb {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open a fresh in-memory database.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Wrap an already opened connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the underlying DuckDB connection (the ambient executor).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction on this connection.
    pub fn begin(&self) -> DbResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }

    /// Give the connection back to the caller.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}
