//! Current command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_workspace;

/// Execute the current command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ledger = load_workspace(global)?.open_ledger()?;
    match ledger
        .current_version()
        .context("Failed to read current version")?
    {
        Some(version) => println!("{version}"),
        None => println!("(no versions)"),
    }
    Ok(())
}
