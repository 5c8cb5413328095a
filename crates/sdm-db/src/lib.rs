//! sdm-db - Database session layer for sdm
//!
//! This crate provides the `Connector` / `DatabaseSession` capability the
//! migration ledger is written against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::{DuckDbConnector, DuckDbSession};
pub use error::{DbError, DbResult};
pub use traits::{with_transaction, Connector, DatabaseSession};
pub use value::{Row, SqlParam, SqlValue};
