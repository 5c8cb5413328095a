//! Apply command implementation

use anyhow::{Context, Result};
use sdm_ledger::VersionChange;

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common::{event_printer, load_workspace};

/// Execute the apply command
pub(crate) fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let workspace = load_workspace(global)?;
    let sql_up = workspace.read_script(&args.up)?;
    let sql_down = args
        .down
        .as_deref()
        .map(|path| workspace.read_script(path))
        .transpose()?;

    let ledger = workspace.open_ledger()?;
    let change = VersionChange::up(&args.version, &args.name, &sql_up, sql_down.as_deref())
        .with_label(args.label.as_deref());

    let mut log = event_printer(global.verbose);
    let executed = ledger
        .apply(&sql_up, &change, &mut log)
        .with_context(|| format!("Failed to apply migration {}", args.name))?;

    println!(
        "Applied {} (version {}, {} statement{})",
        args.name,
        args.version,
        executed,
        if executed == 1 { "" } else { "s" }
    );
    Ok(())
}
