//! ld-core - Core library for Ladder
//!
//! This crate provides the pieces of the migration runner that do not touch
//! the database: semantic version identifiers, content checksums, the source
//! tree abstraction that supplies migration scripts, the ordered file catalog,
//! and project configuration.

pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod source;
pub mod version;

pub use catalog::{Catalog, MigrationFile, OrderKey, Priority};
pub use checksum::compute_checksum;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use source::{DirSource, MemorySource, SourceEntry, SourceTree};
pub use version::Version;
