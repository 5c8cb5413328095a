//! Database session capability

use crate::error::DbResult;
use crate::value::{Row, SqlParam};

/// Opens sessions against one database.
///
/// Every ledger operation calls [`connect`](Connector::connect) and drops the
/// session before returning, so implementations must hand out independent
/// sessions that all see the same data.
pub trait Connector {
    type Session: DatabaseSession;

    /// Open a new session
    fn connect(&self) -> DbResult<Self::Session>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Session = C::Session;

    fn connect(&self) -> DbResult<Self::Session> {
        (**self).connect()
    }
}

/// A single database session.
///
/// Dropping a session releases it. [`close`](DatabaseSession::close) does
/// the same but reports release failures.
pub trait DatabaseSession {
    /// Execute one SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute one statement with `?` placeholders bound to `params`
    fn execute_params(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize>;

    /// Run a query and collect every row
    fn query(&self, sql: &str, params: &[SqlParam]) -> DbResult<Vec<Row>>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;

    /// Check if a table or view exists (name may be schema-qualified)
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Release the session
    fn close(self) -> DbResult<()>
    where
        Self: Sized;
}

/// Run `body` inside `BEGIN` / `COMMIT`, rolling back if it fails.
///
/// A failed commit is rolled back too and reported as the error.
pub fn with_transaction<S, T, F>(session: &S, body: F) -> DbResult<T>
where
    S: DatabaseSession + ?Sized,
    F: FnOnce(&S) -> DbResult<T>,
{
    session.begin()?;

    let result = body(session);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = session.commit() {
                if let Err(e) = session.rollback() {
                    log::warn!("Rollback after failed commit also failed: {e}");
                }
                return Err(commit_err);
            }
        }
        Err(_) => {
            if let Err(e) = session.rollback() {
                log::warn!("Rollback failed: {e}");
            }
        }
    }
    result
}
