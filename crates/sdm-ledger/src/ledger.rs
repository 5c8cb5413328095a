//! Migration history ledger.
//!
//! [`MigrationLedger`] owns the history table: it creates it on first use,
//! runs migration scripts one statement at a time, and records (up) or
//! removes (down) version rows once the script succeeded.
//!
//! Every operation opens its own session from the [`Connector`] and drops it
//! before returning. Migration statements run in the session's autocommit
//! mode, so scripts may carry their own `BEGIN` / `COMMIT`, and a script that
//! fails halfway leaves its earlier statements applied. History writes and
//! table DDL run inside their own transactions.
//! Runs against one history table are assumed to be serialized externally.

use crate::error::{LedgerError, LedgerResult};
use crate::record::{Direction, ExecutionEvent, ExecutionLog, MigrationRecord, VersionChange};
use sdm_core::{ScriptEncoding, TableName};
use sdm_db::{with_transaction, Connector, DatabaseSession, DbError, Row, SqlParam, SqlValue};
use sdm_sql::{is_blank, split_statements};

/// Version of the row seeded into an empty history table.
pub const SENTINEL_VERSION: &str = "0";

/// Executes migrations and tracks applied versions in a history table.
pub struct MigrationLedger<C: Connector> {
    connector: C,
    table: TableName,
    encoding: ScriptEncoding,
}

/// A parameterized write against the history table.
struct PreparedWrite {
    sql: String,
    params: Vec<SqlParam>,
}

impl<C: Connector> MigrationLedger<C> {
    /// Create a ledger over `table`, storing scripts in `encoding`.
    ///
    /// Nothing is touched until [`initialize`](Self::initialize) runs.
    pub fn new(connector: C, table: TableName, encoding: ScriptEncoding) -> Self {
        Self {
            connector,
            table,
            encoding,
        }
    }

    /// Connector sessions are opened from.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Name of the history table.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Encoding used for stored scripts.
    pub fn encoding(&self) -> ScriptEncoding {
        self.encoding
    }

    fn connect(&self) -> LedgerResult<C::Session> {
        self.connector.connect().map_err(LedgerError::Connection)
    }

    /// Create the history table if it is missing and seed the sentinel row
    /// if the table is empty. Safe to call on every startup.
    pub fn initialize(&self) -> LedgerResult<()> {
        let session = self.connect()?;
        let table_err = |source: DbError| LedgerError::HistoryTable {
            table: self.table.to_string(),
            source,
        };

        if !session.relation_exists(&self.table).map_err(table_err)? {
            log::info!(
                "Creating migration history table {} ({})",
                self.table,
                session.db_type()
            );
            let ddl = self.history_table_ddl();
            with_transaction(&session, |s| {
                for stmt in &ddl {
                    s.execute(stmt)?;
                }
                Ok(())
            })
            .map_err(table_err)?;
        }

        let rows = session
            .query(&format!("SELECT COUNT(*) FROM {}", self.table), &[])
            .map_err(table_err)?;
        let count = first_value(rows)
            .map(|v| integer(v, "count"))
            .transpose()
            .map_err(table_err)?
            .unwrap_or(0);

        if count == 0 {
            log::debug!("Seeding {} with sentinel version", self.table);
            with_transaction(&session, |s| {
                s.execute_params(
                    &format!("INSERT INTO {} (version) VALUES (?)", self.table),
                    &[SqlParam::from(SENTINEL_VERSION)],
                )
            })
            .map_err(table_err)?;
        }

        session.close().map_err(LedgerError::Connection)
    }

    /// DDL for the history table; `id` is assigned by a sequence.
    fn history_table_ddl(&self) -> Vec<String> {
        let mut ddl = Vec::new();
        if let Some(schema) = self.table.schema() {
            ddl.push(format!("CREATE SCHEMA IF NOT EXISTS {schema}"));
        }
        let seq = format!("{}_id_seq", self.table);
        ddl.push(format!("CREATE SEQUENCE IF NOT EXISTS {seq}"));
        ddl.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id       BIGINT PRIMARY KEY DEFAULT nextval('{seq}'),
                version  VARCHAR NOT NULL DEFAULT '0',
                label    VARCHAR,
                name     VARCHAR,
                sql_up   BLOB,
                sql_down BLOB
            )",
            self.table
        ));
        ddl
    }

    /// Split `sql` and execute each statement in order.
    ///
    /// Returns the number of statements executed. A blank script executes
    /// nothing; a non-blank script that splits into nothing is a
    /// [`LedgerError::Syntax`]. Statements are not wrapped in a transaction;
    /// execution stops at the first failing statement and statements before
    /// it stay committed.
    pub fn execute_migration(&self, sql: &str, log: &mut dyn ExecutionLog) -> LedgerResult<usize> {
        let statements = split_statements(sql);
        if statements.is_empty() {
            if is_blank(sql) {
                return Ok(0);
            }
            return Err(LedgerError::Syntax {
                sql: sql.to_string(),
            });
        }

        let session = self.connect()?;
        for statement in &statements {
            let affected_rows = session
                .execute(statement)
                .map_err(|source| LedgerError::MigrationExecution {
                    statement: statement.clone(),
                    source,
                })?;
            log::debug!("Executed statement ({affected_rows} row(s) affected): {statement}");
            log.record(&ExecutionEvent::Statement {
                sql: statement.as_str(),
                affected_rows,
            });
        }
        session.close().map_err(LedgerError::Connection)?;

        Ok(statements.len())
    }

    /// Insert (up) or delete (down) the history row for `change`.
    pub fn record_version_change(
        &self,
        change: &VersionChange<'_>,
        log: &mut dyn ExecutionLog,
    ) -> LedgerResult<()> {
        let write = self.prepare_write(change)?;
        self.write_version(change, write, log)
    }

    /// Execute `sql`, then record `change`.
    ///
    /// The history table is only written after every statement succeeded.
    /// Scripts are encoded before anything runs, so an unencodable payload
    /// fails without touching the schema.
    pub fn apply(
        &self,
        sql: &str,
        change: &VersionChange<'_>,
        log: &mut dyn ExecutionLog,
    ) -> LedgerResult<usize> {
        let write = self.prepare_write(change)?;
        let executed = self.execute_migration(sql, log)?;
        self.write_version(change, write, log)?;
        Ok(executed)
    }

    fn prepare_write(&self, change: &VersionChange<'_>) -> LedgerResult<PreparedWrite> {
        match change.direction {
            Direction::Up => {
                let encode = |text: &str| {
                    self.encoding
                        .encode(text)
                        .map_err(|source| LedgerError::Encoding {
                            migration_name: change.migration_name.to_string(),
                            source,
                        })
                };
                let sql_up = encode(change.sql_up)?;
                let sql_down = encode(change.sql_down.unwrap_or(""))?;
                Ok(PreparedWrite {
                    sql: format!(
                        "INSERT INTO {} (version, label, name, sql_up, sql_down) VALUES (?, ?, ?, ?, ?)",
                        self.table
                    ),
                    params: vec![
                        SqlParam::from(change.version),
                        SqlParam::from(change.label),
                        SqlParam::from(change.migration_name),
                        SqlParam::Blob(sql_up),
                        SqlParam::Blob(sql_down),
                    ],
                })
            }
            Direction::Down => Ok(PreparedWrite {
                sql: format!("DELETE FROM {} WHERE version = ?", self.table),
                params: vec![SqlParam::from(change.version)],
            }),
        }
    }

    fn write_version(
        &self,
        change: &VersionChange<'_>,
        write: PreparedWrite,
        log: &mut dyn ExecutionLog,
    ) -> LedgerResult<()> {
        let session = self.connect()?;
        with_transaction(&session, |s| s.execute_params(&write.sql, &write.params)).map_err(
            |source| LedgerError::LedgerWrite {
                migration_name: change.migration_name.to_string(),
                source,
            },
        )?;
        session.close().map_err(LedgerError::Connection)?;

        log::debug!(
            "Migration {} registered ({}, version {})",
            change.migration_name,
            change.direction,
            change.version
        );
        log.record(&ExecutionEvent::Registered {
            migration_name: change.migration_name,
            direction: change.direction,
        });
        Ok(())
    }

    fn query(&self, sql: &str, params: &[SqlParam]) -> LedgerResult<Vec<Row>> {
        let session = self.connect()?;
        let rows = session.query(sql, params).map_err(LedgerError::Query)?;
        session.close().map_err(LedgerError::Connection)?;
        Ok(rows)
    }

    /// Version of the most recently appended row, or `None` if the table is
    /// empty.
    pub fn current_version(&self) -> LedgerResult<Option<String>> {
        let rows = self.query(
            &format!("SELECT version FROM {} ORDER BY id DESC LIMIT 1", self.table),
            &[],
        )?;
        first_value(rows)
            .map(|v| text(v, "version"))
            .transpose()
            .map_err(LedgerError::Query)
    }

    /// Every recorded version, sorted lexically (not in append order).
    pub fn all_versions(&self) -> LedgerResult<Vec<String>> {
        let rows = self.query(
            &format!("SELECT version FROM {} ORDER BY id", self.table),
            &[],
        )?;
        let mut versions = rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(|v| text(v, "version"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(LedgerError::Query)?;
        versions.sort();
        Ok(versions)
    }

    /// Highest id recorded for exactly `version`.
    pub fn version_id(&self, version: &str) -> LedgerResult<Option<i64>> {
        let rows = self.query(
            &format!(
                "SELECT id FROM {} WHERE version = ? ORDER BY id DESC LIMIT 1",
                self.table
            ),
            &[SqlParam::from(version)],
        )?;
        first_value(rows)
            .map(|v| integer(v, "id"))
            .transpose()
            .map_err(LedgerError::Query)
    }

    /// Version of the most recently appended row labelled exactly `label`.
    pub fn version_for_label(&self, label: &str) -> LedgerResult<Option<String>> {
        let rows = self.query(
            &format!(
                "SELECT version FROM {} WHERE label = ? ORDER BY id DESC LIMIT 1",
                self.table
            ),
            &[SqlParam::from(label)],
        )?;
        first_value(rows)
            .map(|v| text(v, "version"))
            .transpose()
            .map_err(LedgerError::Query)
    }

    /// All history rows in append order, scripts decoded.
    pub fn all_migrations(&self) -> LedgerResult<Vec<MigrationRecord>> {
        let rows = self.query(
            &format!(
                "SELECT id, version, label, name, sql_up, sql_down FROM {} ORDER BY id",
                self.table
            ),
            &[],
        )?;
        rows.into_iter()
            .map(|row| self.decode_record(row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(LedgerError::Query)
    }

    /// Most recently appended record for exactly `version`.
    pub fn migration(&self, version: &str) -> LedgerResult<Option<MigrationRecord>> {
        let rows = self.query(
            &format!(
                "SELECT id, version, label, name, sql_up, sql_down FROM {} \
                 WHERE version = ? ORDER BY id DESC LIMIT 1",
                self.table
            ),
            &[SqlParam::from(version)],
        )?;
        rows.into_iter()
            .next()
            .map(|row| self.decode_record(row))
            .transpose()
            .map_err(LedgerError::Query)
    }

    fn decode_record(&self, row: Row) -> Result<MigrationRecord, DbError> {
        let mut cols = row.into_iter();
        let mut next = |column: &'static str| {
            cols.next().ok_or(DbError::UnexpectedValue {
                column,
                expected: "a value",
            })
        };
        Ok(MigrationRecord {
            id: integer(next("id")?, "id")?,
            version: text(next("version")?, "version")?,
            label: optional_text(next("label")?, "label")?,
            file_name: optional_text(next("name")?, "name")?,
            sql_up: self.decode_script(next("sql_up")?, "sql_up")?,
            sql_down: self.decode_script(next("sql_down")?, "sql_down")?,
        })
    }

    fn decode_script(&self, value: SqlValue, column: &'static str) -> Result<String, DbError> {
        match value {
            SqlValue::Null => Ok(String::new()),
            other => other
                .as_bytes()
                .map(|bytes| self.encoding.decode(bytes))
                .ok_or(DbError::UnexpectedValue {
                    column,
                    expected: "text or blob",
                }),
        }
    }
}

fn first_value(rows: Vec<Row>) -> Option<SqlValue> {
    rows.into_iter().next().and_then(|row| row.into_iter().next())
}

fn text(value: SqlValue, column: &'static str) -> Result<String, DbError> {
    value.into_text().ok_or(DbError::UnexpectedValue {
        column,
        expected: "text",
    })
}

/// NULL and empty strings both read as `None`.
fn optional_text(value: SqlValue, column: &'static str) -> Result<Option<String>, DbError> {
    match value {
        SqlValue::Null => Ok(None),
        other => text(other, column).map(|s| Some(s).filter(|s| !s.is_empty())),
    }
}

fn integer(value: SqlValue, column: &'static str) -> Result<i64, DbError> {
    value.as_i64().ok_or(DbError::UnexpectedValue {
        column,
        expected: "integer",
    })
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
