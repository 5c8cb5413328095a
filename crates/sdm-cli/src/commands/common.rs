//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sdm_core::{Config, CoreError, ScriptEncoding};
use sdm_db::DuckDbConnector;
use sdm_ledger::{ExecutionEvent, MigrationLedger};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Loaded configuration plus the directory relative paths resolve against.
pub(crate) struct Workspace {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

/// Load the workspace for a command.
///
/// An explicit `--config` must exist. Without one, `sdm.yml` / `sdm.yaml` in
/// the project directory is used if present, otherwise the defaults.
/// `--database` overrides `database.path`.
pub(crate) fn load_workspace(global: &GlobalArgs) -> Result<Workspace> {
    let root = PathBuf::from(&global.project_dir);

    let mut config = match &global.config {
        Some(path) => {
            Config::load(Path::new(path)).with_context(|| format!("Failed to load config {path}"))?
        }
        None => match Config::load_from_dir(&root) {
            Ok(config) => config,
            Err(CoreError::ConfigNotFound { path }) => {
                log::debug!("No config found at {path}; using defaults");
                Config::default()
            }
            Err(e) => return Err(e).context("Failed to load config"),
        },
    };

    if let Some(database) = &global.database {
        config.database.path = database.clone();
    }

    Ok(Workspace { root, config })
}

impl Workspace {
    pub(crate) fn encoding(&self) -> Result<ScriptEncoding> {
        self.config
            .script_encoding()
            .context("Invalid script_encoding")
    }

    /// Open the configured database, dropping it first when `drop_db_first`
    /// is set.
    pub(crate) fn connector(&self) -> Result<DuckDbConnector> {
        match self.config.database_path_absolute(&self.root) {
            None => DuckDbConnector::in_memory().context("Failed to open in-memory database"),
            Some(path) if self.config.drop_db_first => DuckDbConnector::recreate(&path)
                .with_context(|| format!("Failed to recreate database {}", path.display())),
            Some(path) => DuckDbConnector::from_path(&path)
                .with_context(|| format!("Failed to open database {}", path.display())),
        }
    }

    /// Build the ledger and make sure its history table exists.
    pub(crate) fn open_ledger(&self) -> Result<MigrationLedger<DuckDbConnector>> {
        let ledger = MigrationLedger::new(
            self.connector()?,
            self.config.version_table.clone(),
            self.encoding()?,
        );
        ledger
            .initialize()
            .context("Failed to initialize migration history")?;
        Ok(ledger)
    }

    /// Read a script file, decoding it with the configured script encoding.
    pub(crate) fn read_script(&self, path: &str) -> Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read script {path}"))?;
        Ok(self.encoding()?.decode(&bytes))
    }
}

/// Execution log that echoes every event to stdout when `verbose` is set.
pub(crate) fn event_printer(verbose: bool) -> impl FnMut(&ExecutionEvent<'_>) {
    move |event: &ExecutionEvent<'_>| {
        if verbose {
            println!("{event}");
        }
    }
}

/// Calculate column widths for table output.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
