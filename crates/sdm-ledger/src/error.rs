//! Error types for the migration ledger.

use sdm_core::CoreError;
use sdm_db::DbError;
use thiserror::Error;

/// Migration ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Script has content but splits into no statements (L001).
    #[error("[L001] invalid sql syntax '{sql}'")]
    Syntax { sql: String },

    /// A statement failed at the database (L002).
    #[error("[L002] error executing migration statement '{statement}': {source}")]
    MigrationExecution {
        statement: String,
        #[source]
        source: DbError,
    },

    /// Recording or removing a version row failed (L003).
    #[error("[L003] error logging migration '{migration_name}': {source}")]
    LedgerWrite {
        migration_name: String,
        #[source]
        source: DbError,
    },

    /// No session could be opened (L004).
    #[error("[L004] could not connect to database: {0}")]
    Connection(#[source] DbError),

    /// Reading the history table failed (L005).
    #[error("[L005] history query failed: {0}")]
    Query(#[source] DbError),

    /// Migration payload cannot be stored in the script encoding (L006).
    #[error("[L006] cannot encode scripts of migration '{migration_name}': {source}")]
    Encoding {
        migration_name: String,
        #[source]
        source: CoreError,
    },

    /// Creating or seeding the history table failed (L007).
    #[error("[L007] cannot prepare history table '{table}': {source}")]
    HistoryTable {
        table: String,
        #[source]
        source: DbError,
    },
}

/// Result type alias for [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;
