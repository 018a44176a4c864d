//! Operations on the `ladder_migrations` bookkeeping table.
//!
//! Every function takes an [`Executor`], so it runs the same way on the
//! ambient connection and inside the migrator's transaction.

use crate::error::DbResult;
use crate::executor::Executor;
use crate::record::MigrationRecord;
use chrono::{DateTime, Utc};
use duckdb::types::{ToSql, Type};
use duckdb::Row;
use ld_core::Version;

/// Name of the bookkeeping table.
pub const MIGRATIONS_TABLE: &str = "ladder_migrations";

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS ladder_migrations (
    id          VARCHAR PRIMARY KEY,
    name        VARCHAR NOT NULL,
    version     VARCHAR NOT NULL,
    major       UBIGINT NOT NULL,
    minor       UBIGINT NOT NULL,
    patch       UBIGINT NOT NULL,
    prerelease  VARCHAR NOT NULL,
    scope       VARCHAR NOT NULL,
    up_script   VARCHAR NOT NULL,
    down_script VARCHAR NOT NULL,
    checksum    VARCHAR NOT NULL,
    created_at  TIMESTAMP NOT NULL,
    UNIQUE (scope, version, major, minor, patch, prerelease)
);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_name ON ladder_migrations (name);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_version ON ladder_migrations (version);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_major ON ladder_migrations (major);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_minor ON ladder_migrations (minor);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_patch ON ladder_migrations (patch);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_prerelease ON ladder_migrations (prerelease);
CREATE INDEX IF NOT EXISTS idx_ladder_migrations_scope ON ladder_migrations (scope);
";

const SELECT_COLUMNS: &str = "id, name, version, major, minor, patch, prerelease, scope, \
     up_script, down_script, checksum, epoch_ms(created_at)";

fn map_record(row: &Row<'_>) -> duckdb::Result<MigrationRecord> {
    let created_ms: i64 = row.get(11)?;
    Ok(MigrationRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        version: row.get(2)?,
        major: row.get(3)?,
        minor: row.get(4)?,
        patch: row.get(5)?,
        prerelease: row.get(6)?,
        scope: row.get(7)?,
        up: row.get(8)?,
        down: row.get(9)?,
        checksum: row.get(10)?,
        created_at: DateTime::<Utc>::from_timestamp_millis(created_ms).ok_or_else(|| {
            duckdb::Error::FromSqlConversionFailure(
                11,
                Type::BigInt,
                format!("created_at {created_ms}ms is out of range").into(),
            )
        })?,
    })
}

/// Whether the bookkeeping table is present.
pub fn table_exists<E: Executor>(db: &E) -> DbResult<bool> {
    let counts: Vec<i64> = db.query_map(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = 'main' AND table_name = ?",
        &[&MIGRATIONS_TABLE],
        |row| row.get(0),
    )?;
    Ok(counts.first().copied().unwrap_or(0) > 0)
}

/// Create the bookkeeping table, its indexes and its uniqueness constraint.
///
/// Idempotent.
pub fn create_table_if_missing<E: Executor>(db: &E) -> DbResult<()> {
    db.execute_batch(CREATE_TABLE_SQL)
}

/// Whether a record with this `(name, scope)` identity exists.
pub fn exists<E: Executor>(db: &E, name: &str, scope: &str) -> DbResult<bool> {
    let counts: Vec<i64> = db.query_map(
        "SELECT COUNT(*) FROM ladder_migrations WHERE name = ? AND scope = ?",
        &[&name, &scope],
        |row| row.get(0),
    )?;
    Ok(counts.first().copied().unwrap_or(0) > 0)
}

/// Persist a new record.
///
/// Fails with [`crate::DbError::ConstraintViolation`] when `(scope, version)` is
/// already taken.
pub fn insert<E: Executor>(db: &E, record: &MigrationRecord) -> DbResult<()> {
    let created_ms = record.created_at.timestamp_millis();
    db.execute(
        "INSERT INTO ladder_migrations \
         (id, name, version, major, minor, patch, prerelease, scope, up_script, down_script, checksum, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, epoch_ms(CAST(? AS BIGINT)))",
        &[
            &record.id,
            &record.name,
            &record.version,
            &record.major,
            &record.minor,
            &record.patch,
            &record.prerelease,
            &record.scope,
            &record.up,
            &record.down,
            &record.checksum,
            &created_ms,
        ],
    )?;
    log::debug!("Recorded migration {}", record.identity());
    Ok(())
}

/// Remove records by id, returning how many rows were deleted.
pub fn delete<E: Executor>(db: &E, ids: &[String]) -> DbResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let params: Vec<&dyn ToSql> = ids.iter().map(|id| id as &dyn ToSql).collect();
    let deleted = db.execute(
        &format!("DELETE FROM ladder_migrations WHERE id IN ({placeholders})"),
        &params,
    )?;
    if deleted != ids.len() {
        log::warn!(
            "Expected to delete {} migration records, deleted {deleted}",
            ids.len()
        );
    }
    Ok(deleted)
}

/// Every stored record, ordered by version ascending.
pub fn find_all<E: Executor>(db: &E) -> DbResult<Vec<MigrationRecord>> {
    let mut records = db.query_map(
        &format!("SELECT {SELECT_COLUMNS} FROM ladder_migrations"),
        &[],
        map_record,
    )?;
    records.sort_by(|a, b| {
        a.version()
            .cmp(&b.version())
            .then_with(|| a.scope.cmp(&b.scope))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(records)
}

/// Every record whose version is strictly greater than `version`, ordered
/// by version descending.
pub fn find_above<E: Executor>(db: &E, version: &Version) -> DbResult<Vec<MigrationRecord>> {
    // The SQL prefilter keeps everything at or above the numeric triple;
    // prerelease precedence is applied below.
    let candidates = db.query_map(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM ladder_migrations \
             WHERE major > ? OR (major = ? AND (minor > ? OR (minor = ? AND patch >= ?)))"
        ),
        &[
            &version.major,
            &version.major,
            &version.minor,
            &version.minor,
            &version.patch,
        ],
        map_record,
    )?;
    let mut above: Vec<(Version, MigrationRecord)> = candidates
        .into_iter()
        .map(|record| (record.version(), record))
        .filter(|(v, _)| v > version)
        .collect();
    above.sort_by(|(va, a), (vb, b)| {
        vb.cmp(va)
            .then_with(|| b.scope.cmp(&a.scope))
            .then_with(|| b.name.cmp(&a.name))
    });
    Ok(above.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
