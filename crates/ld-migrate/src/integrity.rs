//! Checksum verification of applied migrations against the source tree.

use crate::error::{MigrateError, MigrateResult};
use ld_core::{compute_checksum, Catalog, MigrationFile, SourceTree};
use ld_db::{store, Executor};
use std::collections::HashMap;

/// Read a file's up-script and down-script.
///
/// The up-script must exist. An absent down-script reads as empty, unless
/// `require_down` is set.
pub(crate) fn read_scripts<S: SourceTree + ?Sized>(
    tree: &S,
    file: &MigrationFile,
    require_down: bool,
) -> MigrateResult<(String, String)> {
    let up = tree
        .read(&file.up_path)
        .map_err(|source| MigrateError::Source {
            op: "read migration up script",
            source,
        })?;
    let down = match tree.read(&file.down_path) {
        Ok(down) => down,
        Err(e) if e.is_not_found() => {
            if require_down {
                return Err(MigrateError::MissingDownScript {
                    path: file.down_path.clone(),
                });
            }
            String::new()
        }
        Err(source) => {
            return Err(MigrateError::Source {
                op: "read migration down script",
                source,
            })
        }
    };
    Ok((up, down))
}

/// Verify every catalog file that has a stored record against the stored
/// checksum.
///
/// Files without a record are not yet applied and only have their scripts
/// read. With `allow_downgrade`, every file must have a down-script, even
/// on an empty table before anything has been applied.
/// Returns the number of files compared against a stored checksum.
pub fn verify<E, S>(
    db: &E,
    tree: &S,
    catalog: &Catalog,
    allow_downgrade: bool,
) -> MigrateResult<usize>
where
    E: Executor,
    S: SourceTree + ?Sized,
{
    let records = store::find_all(db).map_err(|source| MigrateError::Store {
        op: "find all migrations",
        source,
    })?;
    let stored: HashMap<String, String> = records
        .into_iter()
        .map(|record| (record.identity(), record.checksum))
        .collect();

    let mut checked = 0;
    for file in catalog {
        let (up, down) = read_scripts(tree, file, allow_downgrade)?;
        let Some(stored_checksum) = stored.get(&file.identity()) else {
            continue;
        };
        let computed = compute_checksum(&[&up, &down]);
        if computed != *stored_checksum {
            return Err(MigrateError::Corruption {
                path: file.up_path.clone(),
                stored: stored_checksum.clone(),
                computed,
            });
        }
        checked += 1;
    }
    log::debug!("Verified {checked} applied migrations");
    Ok(checked)
}

#[cfg(test)]
#[path = "integrity_test.rs"]
mod tests;
