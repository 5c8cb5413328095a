//! Versions command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_workspace;

/// Execute the versions command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ledger = load_workspace(global)?.open_ledger()?;
    let versions = ledger.all_versions().context("Failed to list versions")?;
    for version in &versions {
        println!("{version}");
    }
    Ok(())
}
