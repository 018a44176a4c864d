//! Direction selection and forward candidate selection.

use crate::error::{MigrateError, MigrateResult};
use ld_core::{Catalog, MigrationFile, Version};
use ld_db::{store, Executor, MigrationRecord};

/// What a `migrate` call will do once integrity has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// No records above the target: apply every pending file up to it.
    Apply,
    /// Revert these records, in the given (descending) order.
    Revert(Vec<MigrationRecord>),
    /// Records above the target exist but downgrade is disabled; nothing is
    /// applied or reverted.
    Blocked(Vec<MigrationRecord>),
}

impl Plan {
    /// Decide the direction from the records above the target.
    pub fn decide(higher: Vec<MigrationRecord>, allow_downgrade: bool) -> Self {
        if higher.is_empty() {
            Plan::Apply
        } else if allow_downgrade {
            Plan::Revert(higher)
        } else {
            Plan::Blocked(higher)
        }
    }
}

/// Catalog files at or below `target` that have no stored record yet, in
/// catalog order.
pub fn select_pending<'a, E: Executor>(
    db: &E,
    catalog: &'a Catalog,
    target: &Version,
) -> MigrateResult<Vec<&'a MigrationFile>> {
    let mut pending = Vec::new();
    for file in catalog {
        if file.version > *target {
            continue;
        }
        let applied = store::exists(db, &file.name, &file.scope).map_err(|source| {
            MigrateError::Store {
                op: "verify migration existence",
                source,
            }
        })?;
        if applied {
            log::debug!("Skipping applied migration {}", file.identity());
            continue;
        }
        pending.push(file);
    }
    Ok(pending)
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
