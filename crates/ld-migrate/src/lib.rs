//! ld-migrate - Migration engine for Ladder
//!
//! [`Migrator`] brings a DuckDB database to a target version using the
//! `<version>_<name>_up.sql` / `_down.sql` scripts of a [`SourceTree`]:
//!
//! 1. the bookkeeping table is ensured when the migrator is constructed;
//! 2. each call rebuilds the file catalog and verifies every previously
//!    applied script against its stored checksum;
//! 3. records above the target are reverted (when downgrade is allowed),
//!    otherwise every unapplied file at or below the target is applied;
//! 4. all of it runs in one transaction that commits or rolls back as a unit.
//!
//! Concurrent migrators against the same database are not coordinated.
//!
//! [`SourceTree`]: ld_core::SourceTree

pub mod engine;
pub mod error;
pub mod integrity;
pub mod plan;

pub use engine::{MigrationReport, Migrator, MigratorOptions};
pub use error::{MigrateError, MigrateResult};
pub use plan::Plan;
