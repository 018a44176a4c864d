//! Source trees that supply migration script bytes.
//!
//! Paths handed out and accepted by a [`SourceTree`] are relative to the
//! tree's root and always use `/` as the separator, whatever the host
//! platform. Scopes are derived from these paths and persisted, so the
//! separator must not vary.

use crate::error::{CoreError, CoreResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// One entry discovered under a source root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceEntry {
    /// `/`-separated path relative to the root.
    pub path: String,
    pub is_dir: bool,
}

impl SourceEntry {
    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Read/list access to a hierarchy of migration scripts.
pub trait SourceTree {
    /// List every entry under the root, recursively, sorted by path.
    fn entries(&self) -> CoreResult<Vec<SourceEntry>>;

    /// Read the full contents of a file entry.
    ///
    /// A missing entry yields an error for which
    /// [`CoreError::is_not_found`] is true.
    fn read(&self, path: &str) -> CoreResult<String>;
}

/// A migration source backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(&self, dir: &Path, prefix: &str, entries: &mut Vec<SourceEntry>) -> CoreResult<()> {
        let io_err = |source| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source,
        };
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("Skipping non UTF-8 path {}", entry.path().display());
                continue;
            };
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            // does not follow symlinks
            if entry.file_type().map_err(io_err)?.is_dir() {
                self.walk(&entry.path(), &rel, entries)?;
                entries.push(SourceEntry {
                    path: rel,
                    is_dir: true,
                });
            } else {
                entries.push(SourceEntry {
                    path: rel,
                    is_dir: false,
                });
            }
        }
        Ok(())
    }
}

impl SourceTree for DirSource {
    fn entries(&self) -> CoreResult<Vec<SourceEntry>> {
        if !self.root.is_dir() {
            return Err(CoreError::SourceNotFound {
                path: self.root.display().to_string(),
            });
        }
        let mut entries = Vec::new();
        self.walk(&self.root, "", &mut entries)?;
        entries.sort();
        Ok(entries)
    }

    fn read(&self, path: &str) -> CoreResult<String> {
        let full = path
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        if !full.is_file() {
            return Err(CoreError::EntryNotFound {
                path: path.to_string(),
            });
        }
        std::fs::read_to_string(&full).map_err(|source| CoreError::IoWithPath {
            path: full.display().to_string(),
            source,
        })
    }
}

/// An in-memory migration source.
///
/// Useful for scripts embedded into a binary with `include_str!`. Directory
/// entries are implied by the file paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from `(path, contents)` pairs.
    pub fn from_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        let mut source = Self::new();
        for (path, contents) in files {
            source.insert(path, contents);
        }
        source
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        let path = path.into().trim_matches('/').to_string();
        self.files.insert(path, contents.into());
    }

    /// Remove a file, returning its previous contents.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }
}

impl SourceTree for MemorySource {
    fn entries(&self) -> CoreResult<Vec<SourceEntry>> {
        let mut dirs = BTreeSet::new();
        for path in self.files.keys() {
            let mut end = 0;
            while let Some(pos) = path[end..].find('/') {
                end += pos;
                dirs.insert(path[..end].to_string());
                end += 1;
            }
        }
        let mut entries: Vec<SourceEntry> = dirs
            .into_iter()
            .map(|path| SourceEntry { path, is_dir: true })
            .chain(self.files.keys().map(|path| SourceEntry {
                path: path.clone(),
                is_dir: false,
            }))
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn read(&self, path: &str) -> CoreResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::EntryNotFound {
                path: path.to_string(),
            })
    }
}

impl<T: SourceTree + ?Sized> SourceTree for &T {
    fn entries(&self) -> CoreResult<Vec<SourceEntry>> {
        (**self).entries()
    }

    fn read(&self, path: &str) -> CoreResult<String> {
        (**self).read(path)
    }
}

impl<T: SourceTree + ?Sized> SourceTree for Box<T> {
    fn entries(&self) -> CoreResult<Vec<SourceEntry>> {
        (**self).entries()
    }

    fn read(&self, path: &str) -> CoreResult<String> {
        (**self).read(path)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
