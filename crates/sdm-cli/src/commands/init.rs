//! Init command implementation - creates the migration history table

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_workspace;

/// Execute the init command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let workspace = load_workspace(global)?;
    let ledger = workspace.open_ledger()?;

    let current = ledger
        .current_version()
        .context("Failed to read current version")?;

    println!(
        "Migration history table {} ready (database: {}, encoding: {})",
        ledger.table(),
        workspace.config.database.path,
        ledger.encoding()
    );
    if let Some(version) = current {
        println!("Current version: {version}");
    }
    Ok(())
}
