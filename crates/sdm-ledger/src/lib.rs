//! Migration history ledger for sdm.
//!
//! Executes migration scripts statement by statement (split with
//! [`sdm_sql::split_statements`]) and records applied versions in a history
//! table, in that order: a version is only recorded once its SQL ran.

pub mod error;
pub mod ledger;
pub mod record;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{MigrationLedger, SENTINEL_VERSION};
pub use record::{Direction, ExecutionEvent, ExecutionLog, MigrationRecord, NoLog, VersionChange};
