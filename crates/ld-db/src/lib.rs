//! ld-db - Database layer for Ladder
//!
//! This crate provides the [`Executor`] trait shared by the ambient DuckDB
//! connection and an open [`Transaction`], the [`LadderDb`] handle, and the
//! bookkeeping table operations in [`store`].

pub mod connection;
pub mod error;
pub mod executor;
pub mod record;
pub mod store;

pub use connection::LadderDb;
pub use error::{DbError, DbResult};
pub use executor::{Executor, Transaction};
pub use record::MigrationRecord;
