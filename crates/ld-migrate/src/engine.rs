//! The migration engine.

use crate::error::{MigrateError, MigrateResult};
use crate::integrity::{self, read_scripts};
use crate::plan::{self, Plan};
use ld_core::{Catalog, MigrationFile, SourceTree, Version};
use ld_db::{store, Executor, LadderDb, MigrationRecord};

/// Construction-time settings for a [`Migrator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigratorOptions {
    /// Revert applied migrations above a lower target instead of leaving
    /// them in place.
    pub allow_downgrade: bool,
}

/// Outcome of a successful `migrate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub target: Option<Version>,
    /// `scope/name` of each applied file, in execution order.
    pub applied: Vec<String>,
    /// `scope/name` of each reverted record, in execution order.
    pub reverted: Vec<String>,
    /// Records above the target left in place because downgrade is disabled.
    pub blocked: Vec<String>,
}

impl MigrationReport {
    /// Whether the call changed nothing.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty() && self.reverted.is_empty()
    }
}

/// Applies and reverts versioned SQL migrations against a [`LadderDb`].
pub struct Migrator<S> {
    db: LadderDb,
    source: S,
    options: MigratorOptions,
}

impl<S: SourceTree> Migrator<S> {
    /// Create a migrator, ensuring the bookkeeping table exists.
    pub fn new(db: LadderDb, source: S, options: MigratorOptions) -> MigrateResult<Self> {
        let exists =
            store::table_exists(db.conn()).map_err(|source| MigrateError::Construction {
                op: "check migrations table existence",
                source,
            })?;
        if !exists {
            store::create_table_if_missing(db.conn()).map_err(|source| {
                MigrateError::Construction {
                    op: "create migrations table",
                    source,
                }
            })?;
            log::info!("Created table {}", store::MIGRATIONS_TABLE);
        }
        Ok(Self {
            db,
            source,
            options,
        })
    }

    pub fn db(&self) -> &LadderDb {
        &self.db
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> MigratorOptions {
        self.options
    }

    /// Release the database handle.
    pub fn into_db(self) -> LadderDb {
        self.db
    }

    /// Scan the source tree into an ordered catalog.
    pub fn catalog(&self) -> MigrateResult<Catalog> {
        Catalog::build(&self.source)
            .map_err(|e| MigrateError::from_catalog("collect migrations", e))
    }

    /// Migrate to the highest version found in the source tree.
    pub fn migrate_latest(&self) -> MigrateResult<MigrationReport> {
        let catalog = self.catalog()?;
        let latest = catalog
            .latest_version()
            .ok_or(MigrateError::NoMigrations)?
            .to_string();
        self.migrate(&latest)
    }

    /// Migrate to `target`.
    ///
    /// Applies every unapplied file at or below `target`, or, when records
    /// above `target` exist, reverts them (downgrade enabled) or leaves the
    /// database untouched with a warning (downgrade disabled). Everything
    /// runs in one transaction.
    pub fn migrate(&self, target: &str) -> MigrateResult<MigrationReport> {
        let target = parse_target(target)?;
        let higher = store::find_above(self.db.conn(), &target).map_err(|source| {
            MigrateError::Store {
                op: "find higher version migrations",
                source,
            }
        })?;

        let tx = self.db.begin().map_err(|source| MigrateError::Store {
            op: "begin migrations",
            source,
        })?;

        let report = match self.run(&tx, &target, higher) {
            Ok(report) => report,
            Err(err) => {
                return Err(match tx.rollback() {
                    Ok(()) => err,
                    Err(rollback) => MigrateError::Rollback {
                        cause: Box::new(err),
                        rollback,
                    },
                });
            }
        };

        tx.commit()
            .map_err(|source| MigrateError::Commit { source })?;
        log::info!(
            "Migrated to {target}: {} applied, {} reverted",
            report.applied.len(),
            report.reverted.len()
        );
        Ok(report)
    }

    /// Files a forward `migrate(target)` would apply, without running them.
    pub fn pending(&self, target: &str) -> MigrateResult<Vec<MigrationFile>> {
        let target = parse_target(target)?;
        let catalog = self.catalog()?;
        let pending = plan::select_pending(self.db.conn(), &catalog, &target)?;
        Ok(pending.into_iter().cloned().collect())
    }

    /// Every applied record, ordered by version.
    pub fn applied(&self) -> MigrateResult<Vec<MigrationRecord>> {
        store::find_all(self.db.conn()).map_err(|source| MigrateError::Store {
            op: "find all migrations",
            source,
        })
    }

    /// Verify applied scripts against the source tree without migrating.
    ///
    /// Returns the number of applied files checked.
    pub fn verify(&self) -> MigrateResult<usize> {
        let catalog = self.catalog()?;
        integrity::verify(
            self.db.conn(),
            &self.source,
            &catalog,
            self.options.allow_downgrade,
        )
    }

    fn run<E: Executor>(
        &self,
        tx: &E,
        target: &Version,
        higher: Vec<MigrationRecord>,
    ) -> MigrateResult<MigrationReport> {
        let catalog = self.catalog()?;
        integrity::verify(tx, &self.source, &catalog, self.options.allow_downgrade)?;

        let mut report = MigrationReport {
            target: Some(target.clone()),
            ..Default::default()
        };
        match Plan::decide(higher, self.options.allow_downgrade) {
            Plan::Apply => report.applied = self.apply(tx, &catalog, target)?,
            Plan::Revert(records) => report.reverted = self.revert(tx, &records)?,
            Plan::Blocked(records) => {
                log::warn!(
                    "Downgrade not enabled: {} migration(s) above {target} left in place",
                    records.len()
                );
                report.blocked = records.iter().map(MigrationRecord::identity).collect();
            }
        }
        Ok(report)
    }

    fn apply<E: Executor>(
        &self,
        tx: &E,
        catalog: &Catalog,
        target: &Version,
    ) -> MigrateResult<Vec<String>> {
        let mut applied = Vec::new();
        for file in plan::select_pending(tx, catalog, target)? {
            let (up, down) = read_scripts(&self.source, file, false)?;
            run_script(tx, &up).map_err(|source| MigrateError::Execution {
                op: "run migration up",
                migration: file.identity(),
                source,
            })?;
            log::info!("up {}", file.identity());

            let record = MigrationRecord::from_file(file, up, down);
            store::insert(tx, &record).map_err(|source| MigrateError::Store {
                op: "insert migration",
                source,
            })?;
            applied.push(file.identity());
        }
        Ok(applied)
    }

    fn revert<E: Executor>(
        &self,
        tx: &E,
        records: &[MigrationRecord],
    ) -> MigrateResult<Vec<String>> {
        let mut ids = Vec::with_capacity(records.len());
        let mut reverted = Vec::with_capacity(records.len());
        for record in records {
            run_script(tx, &record.down).map_err(|source| MigrateError::Execution {
                op: "run migration down",
                migration: record.identity(),
                source,
            })?;
            log::info!("down {}", record.identity());
            ids.push(record.id.clone());
            reverted.push(record.identity());
        }
        store::delete(tx, &ids).map_err(|source| MigrateError::Store {
            op: "delete migrations",
            source,
        })?;
        Ok(reverted)
    }
}

fn parse_target(target: &str) -> MigrateResult<Version> {
    Version::parse(target).map_err(|source| MigrateError::Parse {
        op: "parse version",
        source,
    })
}

/// Execute a script; blank scripts are a no-op.
fn run_script<E: Executor>(tx: &E, sql: &str) -> ld_db::DbResult<()> {
    if sql.trim().is_empty() {
        return Ok(());
    }
    tx.execute_batch(sql)
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
