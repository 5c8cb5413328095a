//! DuckDB session implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, DatabaseSession};
use crate::value::{Row, SqlParam, SqlValue};
use duckdb::types::{ToSql, ToSqlOutput, Value, ValueRef};
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// DuckDB connector
///
/// Holds one root connection; every session is a clone of it, so in-memory
/// databases are shared by all sessions and a file is only opened once per
/// process.
pub struct DuckDbConnector {
    root: Connection,
}

impl DuckDbConnector {
    /// Create a new in-memory DuckDB database
    pub fn in_memory() -> DbResult<Self> {
        let root =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { root })
    }

    /// Open (or create) a DuckDB database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let root = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { root })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Delete the database file (and its WAL) if present, then open it fresh.
    pub fn recreate(path: &Path) -> DbResult<Self> {
        for file in [path.to_path_buf(), wal_path(path)] {
            if file.exists() {
                log::info!("Dropping database file {}", file.display());
                std::fs::remove_file(&file).map_err(|e| {
                    DbError::ConnectionError(format!(
                        "can't drop database '{}': {e}",
                        file.display()
                    ))
                })?;
            }
        }
        Self::from_path(path)
    }
}

fn wal_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".wal");
    PathBuf::from(name)
}

impl Connector for DuckDbConnector {
    type Session = DuckDbSession;

    fn connect(&self) -> DbResult<DuckDbSession> {
        let conn = self
            .root
            .try_clone()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(DuckDbSession { conn })
    }
}

/// One DuckDB session, released on drop
pub struct DuckDbSession {
    conn: Connection,
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlParam::Null => Value::Null,
            SqlParam::Integer(n) => Value::BigInt(*n),
            SqlParam::Text(s) => Value::Text(s.clone()),
            SqlParam::Blob(b) => Value::Blob(b.clone()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

fn bind(params: &[SqlParam]) -> Vec<&dyn ToSql> {
    params.iter().map(|p| p as &dyn ToSql).collect()
}

/// Read a column into the value types the ledger understands.
fn read_value(row: &duckdb::Row<'_>, idx: usize) -> duckdb::Result<SqlValue> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Boolean(b) => SqlValue::Integer(i64::from(b)),
        ValueRef::TinyInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::SmallInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::Int(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::BigInt(n) => SqlValue::Integer(n),
        ValueRef::UTinyInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::USmallInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::UInt(n) => SqlValue::Integer(i64::from(n)),
        ValueRef::UBigInt(n) => match i64::try_from(n) {
            Ok(n) => SqlValue::Integer(n),
            Err(_) => SqlValue::Text(n.to_string()),
        },
        ValueRef::Float(f) => SqlValue::Real(f64::from(f)),
        ValueRef::Double(f) => SqlValue::Real(f),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        _ => {
            log::debug!("Column {idx} has a type sdm does not read; treating as NULL");
            SqlValue::Null
        }
    };
    Ok(value)
}

impl DatabaseSession for DuckDbSession {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        Ok(self.conn.execute(sql, [])?)
    }

    fn execute_params(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize> {
        let bound = bind(params);
        Ok(self.conn.execute(sql, bound.as_slice())?)
    }

    fn query(&self, sql: &str, params: &[SqlParam]) -> DbResult<Vec<Row>> {
        let bound = bind(params);
        let mut stmt = self.conn.prepare(sql)?;
        // Column metadata is only safe to read once the statement has run.
        let rows = stmt
            .query_map(bound.as_slice(), |row| {
                let col_count = row.as_ref().column_count();
                (0..col_count)
                    .map(|i| read_value(row, i))
                    .collect::<duckdb::Result<Row>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn begin(&self) -> DbResult<()> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    fn commit(&self) -> DbResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    fn rollback(&self) -> DbResult<()> {
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = name.rsplit_once('.').unwrap_or(("main", name));

        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| DbError::ConnectionError(format!("close failed: {e}")))
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
