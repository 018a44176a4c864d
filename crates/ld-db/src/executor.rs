//! The statement executor shared by connections and transactions.
//!
//! Store operations are written against [`Executor`] so the same code runs
//! on the ambient [`Connection`] or inside an open [`Transaction`].

use crate::error::{DbError, DbResult};
use duckdb::types::ToSql;
use duckdb::{Connection, Row};

/// Execute statements and queries with positional parameters.
pub trait Executor {
    /// Execute a single statement, returning the affected row count.
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize>;

    /// Execute a script of one or more statements without parameters.
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and map every returned row with `f`.
    fn query_map<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>;
}

fn execute_on(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
    Ok(Connection::execute(conn, sql, params)?)
}

fn execute_batch_on(conn: &Connection, sql: &str) -> DbResult<()> {
    Ok(Connection::execute_batch(conn, sql)?)
}

fn query_map_on<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
    f: F,
) -> DbResult<Vec<T>>
where
    F: FnMut(&Row<'_>) -> duckdb::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, f)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

impl Executor for Connection {
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
        execute_on(self, sql, params)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        execute_batch_on(self, sql)
    }

    fn query_map<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        query_map_on(self, sql, params, f)
    }
}

/// An open `BEGIN TRANSACTION` on a borrowed connection.
///
/// Must be finished with [`commit`](Self::commit) or
/// [`rollback`](Self::rollback); dropping an unfinished transaction rolls it
/// back.
pub struct Transaction<'conn> {
    conn: &'conn Connection,
    finished: bool,
}

impl<'conn> Transaction<'conn> {
    /// Begin a transaction on `conn`.
    pub fn begin(conn: &'conn Connection) -> DbResult<Self> {
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Commit the transaction.
    ///
    /// A failed COMMIT is followed by a ROLLBACK attempt; if that fails too,
    /// both errors are reported.
    pub fn commit(mut self) -> DbResult<()> {
        self.finished = true;
        if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
            return Err(match self.conn.execute_batch("ROLLBACK") {
                Ok(()) => DbError::CommitFailed {
                    commit: commit_err.to_string(),
                },
                Err(rollback_err) => DbError::CommitAndRollbackFailed {
                    commit: commit_err.to_string(),
                    rollback: rollback_err.to_string(),
                },
            });
        }
        Ok(())
    }

    /// Roll the transaction back.
    pub fn rollback(mut self) -> DbResult<()> {
        self.finished = true;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            log::warn!("Rollback of abandoned transaction failed: {e}");
        }
    }
}

impl Executor for Transaction<'_> {
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
        execute_on(self.conn, sql, params)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        execute_batch_on(self.conn, sql)
    }

    fn query_map<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        query_map_on(self.conn, sql, params, f)
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
