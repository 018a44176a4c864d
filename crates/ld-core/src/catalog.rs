//! Discovery and ordering of migration script pairs.
//!
//! Migration files are named `<version>_<name>_up.sql` with an optional
//! `<version>_<name>_down.sql` sibling. Directories (and files) whose name
//! starts with an integer followed by `_` contribute that integer to the
//! file's [`Priority`], which orders files before their version does.

use crate::error::{CoreError, CoreResult};
use crate::source::SourceTree;
use crate::version::Version;
use std::cmp::Ordering;

/// File name suffix of a forward script.
pub const UP_SUFFIX: &str = "_up.sql";

/// File name suffix of a reversing script.
pub const DOWN_SUFFIX: &str = "_down.sql";

/// Numeric ordering hint collected from `<int>_` path segment prefixes.
///
/// Compared element-wise; on a common prefix the shorter sequence is smaller.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub Vec<i64>);

impl Priority {
    /// Extract the priority from a `/`-separated path.
    ///
    /// Segments without a parseable leading integer are skipped.
    pub fn from_path(path: &str) -> Self {
        Self(
            path.split('/')
                .filter_map(|segment| segment.split_once('_'))
                .filter_map(|(token, _)| token.parse::<i64>().ok())
                .collect(),
        )
    }
}

/// Composite ordering key: priority, then version, then name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey<'a> {
    pub priority: &'a Priority,
    pub version: &'a Version,
    pub name: &'a str,
}

impl Ord for OrderKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(other.priority)
            .then_with(|| self.version.cmp(other.version))
            .then_with(|| self.name.cmp(other.name))
    }
}

impl PartialOrd for OrderKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A migration script pair discovered in a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub priority: Priority,
    pub version: Version,
    /// Directory path of the script, `""` at the source root.
    pub scope: String,
    /// File name of the up-script.
    pub name: String,
    pub up_path: String,
    /// May not exist in the source.
    pub down_path: String,
}

impl MigrationFile {
    /// Derive a migration file from the path of its up-script.
    pub fn from_up_path(path: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidMigrationName {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let (scope, name) = match path.rsplit_once('/') {
            Some((scope, name)) => (scope.trim_end_matches('/'), name),
            None => ("", path),
        };
        if !name.ends_with(UP_SUFFIX) {
            return Err(invalid("expected a `_up.sql` suffix"));
        }
        let (raw_version, _) = name
            .split_once('_')
            .ok_or_else(|| invalid("expected `<version>_<name>_up.sql`"))?;
        let version = Version::parse(raw_version).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            priority: Priority::from_path(path),
            version,
            scope: scope.to_string(),
            name: name.to_string(),
            up_path: path.to_string(),
            down_path: format!("{}{}", &path[..path.len() - UP_SUFFIX.len()], DOWN_SUFFIX),
        })
    }

    pub fn order_key(&self) -> OrderKey<'_> {
        OrderKey {
            priority: &self.priority,
            version: &self.version,
            name: &self.name,
        }
    }

    /// `scope/name` identity used to match stored records.
    pub fn identity(&self) -> String {
        format!("{}/{}", self.scope, self.name)
    }
}

/// The ordered set of migration files found in a source tree.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    files: Vec<MigrationFile>,
}

impl Catalog {
    /// Scan `source` and build the catalog in execution order.
    ///
    /// Any unparsable up-script name aborts the whole scan; a partially
    /// discovered migration set is never returned.
    pub fn build<S: SourceTree + ?Sized>(source: &S) -> CoreResult<Self> {
        let mut files = Vec::new();
        for entry in source.entries()? {
            if entry.is_dir {
                continue;
            }
            let name = entry.file_name();
            if name.ends_with(DOWN_SUFFIX) {
                continue;
            }
            if !name.ends_with(UP_SUFFIX) {
                log::debug!("Ignoring non-migration file {}", entry.path);
                continue;
            }
            let file = MigrationFile::from_up_path(&entry.path)?;
            log::debug!("Discovered migration {} ({})", file.identity(), file.version);
            files.push(file);
        }
        Ok(Self::from_files(files))
    }

    /// Sort already-derived files into a catalog.
    pub fn from_files(mut files: Vec<MigrationFile>) -> Self {
        files.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        Self { files }
    }

    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MigrationFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Highest version among all files, if any.
    pub fn latest_version(&self) -> Option<&Version> {
        self.files.iter().map(|f| &f.version).max()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MigrationFile;
    type IntoIter = std::slice::Iter<'a, MigrationFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
