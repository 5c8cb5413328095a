//! Rollback command implementation

use anyhow::{Context, Result};
use sdm_ledger::VersionChange;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::commands::common::{event_printer, load_workspace};

/// Execute the rollback command
///
/// Uses the down script from `--down` when given, otherwise the one stored
/// when the version was applied.
pub(crate) fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let workspace = load_workspace(global)?;
    let down_file = args
        .down
        .as_deref()
        .map(|path| workspace.read_script(path))
        .transpose()?;

    let ledger = workspace.open_ledger()?;
    let Some(record) = ledger
        .migration(&args.version)
        .context("Failed to read migration history")?
    else {
        anyhow::bail!("Version {} is not in the migration history", args.version);
    };

    let sql_down = down_file.unwrap_or(record.sql_down);
    if sql_down.trim().is_empty() {
        log::warn!("Version {} has no down script; only removing its history", args.version);
    }
    let name = record.file_name.as_deref().unwrap_or(&args.version);

    let mut log = event_printer(global.verbose);
    let executed = ledger
        .apply(&sql_down, &VersionChange::down(&args.version, name), &mut log)
        .with_context(|| format!("Failed to roll back migration {name}"))?;

    println!(
        "Rolled back {} (version {}, {} statement{})",
        name,
        args.version,
        executed,
        if executed == 1 { "" } else { "s" }
    );
    Ok(())
}
