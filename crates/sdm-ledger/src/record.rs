//! Ledger rows, version changes, and execution log events.

use serde::Serialize;
use std::fmt;

/// One row of the migration history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    /// Storage-assigned, append-ordered id
    pub id: i64,
    pub version: String,
    pub label: Option<String>,
    /// Originating migration name (`name` column)
    pub file_name: Option<String>,
    pub sql_up: String,
    pub sql_down: String,
}

/// Which way a migration is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply forward and append a history row
    Up,
    /// Apply backward and delete the version's history rows
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A version entry to record (up) or remove (down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionChange<'a> {
    pub version: &'a str,
    pub migration_name: &'a str,
    pub sql_up: &'a str,
    pub sql_down: Option<&'a str>,
    pub direction: Direction,
    pub label: Option<&'a str>,
}

impl<'a> VersionChange<'a> {
    /// An upward change storing both scripts.
    pub fn up(
        version: &'a str,
        migration_name: &'a str,
        sql_up: &'a str,
        sql_down: Option<&'a str>,
    ) -> Self {
        Self {
            version,
            migration_name,
            sql_up,
            sql_down,
            direction: Direction::Up,
            label: None,
        }
    }

    /// A downward change; only `version` selects what gets deleted.
    pub fn down(version: &'a str, migration_name: &'a str) -> Self {
        Self {
            version,
            migration_name,
            sql_up: "",
            sql_down: None,
            direction: Direction::Down,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Option<&'a str>) -> Self {
        self.label = label;
        self
    }
}

/// Something the ledger did, reported to an [`ExecutionLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionEvent<'a> {
    /// A migration statement ran
    Statement { sql: &'a str, affected_rows: usize },
    /// A version row was inserted or deleted
    Registered {
        migration_name: &'a str,
        direction: Direction,
    },
}

impl fmt::Display for ExecutionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionEvent::Statement { sql, affected_rows } => {
                write!(f, "{sql}\n-- {affected_rows} row(s) affected")
            }
            ExecutionEvent::Registered { migration_name, .. } => {
                write!(f, "migration {migration_name} registered")
            }
        }
    }
}

/// Receives execution events while a migration runs.
///
/// Any `FnMut(&ExecutionEvent)` closure is a log; [`NoLog`] discards events.
pub trait ExecutionLog {
    fn record(&mut self, event: &ExecutionEvent<'_>);
}

impl<F> ExecutionLog for F
where
    F: FnMut(&ExecutionEvent<'_>),
{
    fn record(&mut self, event: &ExecutionEvent<'_>) {
        self(event)
    }
}

/// An [`ExecutionLog`] that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLog;

impl ExecutionLog for NoLog {
    fn record(&mut self, _event: &ExecutionEvent<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let stmt = ExecutionEvent::Statement {
            sql: "DELETE FROM t",
            affected_rows: 4,
        };
        assert_eq!(stmt.to_string(), "DELETE FROM t\n-- 4 row(s) affected");

        let registered = ExecutionEvent::Registered {
            migration_name: "20240101_add_users",
            direction: Direction::Up,
        };
        assert_eq!(
            registered.to_string(),
            "migration 20240101_add_users registered"
        );
    }

    #[test]
    fn test_closure_is_execution_log() {
        let mut seen = Vec::new();
        {
            let mut log = |event: &ExecutionEvent<'_>| seen.push(event.to_string());
            log.record(&ExecutionEvent::Registered {
                migration_name: "m",
                direction: Direction::Down,
            });
        }
        assert_eq!(seen, vec!["migration m registered"]);
    }

    #[test]
    fn test_version_change_builders() {
        let up = VersionChange::up("20240101", "init", "CREATE TABLE t (id INT)", None)
            .with_label(Some("v1"));
        assert_eq!(up.direction, Direction::Up);
        assert_eq!(up.label, Some("v1"));

        let down = VersionChange::down("20240101", "init");
        assert_eq!(down.direction, Direction::Down);
        assert_eq!(down.sql_up, "");
    }
}
