//! The persisted bookkeeping row for one applied migration.

use chrono::{DateTime, Utc};
use ld_core::{compute_checksum, MigrationFile, Version};

/// A row of the migrations table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub id: String,
    pub name: String,
    /// Canonical rendering of the version.
    pub version: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: String,
    pub scope: String,
    pub up: String,
    pub down: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

impl MigrationRecord {
    /// Build the record for a file that has just been applied.
    pub fn from_file(file: &MigrationFile, up: String, down: String) -> Self {
        let checksum = compute_checksum(&[&up, &down]);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: file.name.clone(),
            version: file.version.to_string(),
            major: file.version.major,
            minor: file.version.minor,
            patch: file.version.patch,
            prerelease: file.version.prerelease.clone(),
            scope: file.scope.clone(),
            up,
            down,
            checksum,
            created_at: Utc::now(),
        }
    }

    /// Version assembled from the stored components.
    pub fn version(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease: self.prerelease.clone(),
        }
    }

    /// `scope/name` identity, matching [`MigrationFile::identity`].
    pub fn identity(&self) -> String {
        format!("{}/{}", self.scope, self.name)
    }
}
