//! History command implementation

use anyhow::{Context, Result};
use sdm_ledger::MigrationRecord;

use crate::cli::{GlobalArgs, HistoryArgs, HistoryOutput};
use crate::commands::common::{self, load_workspace};

/// Execute the history command
pub(crate) fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ledger = load_workspace(global)?.open_ledger()?;
    let records = ledger
        .all_migrations()
        .context("Failed to read migration history")?;

    match args.output {
        HistoryOutput::Table => print_table_output(&records),
        HistoryOutput::Json => print_json_output(&records)?,
    }
    Ok(())
}

fn print_table_output(records: &[MigrationRecord]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.version.clone(),
                r.label.clone().unwrap_or_else(|| "-".to_string()),
                r.file_name.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    common::print_table(&["ID", "VERSION", "LABEL", "NAME"], &rows);
    println!("\n({} rows)", rows.len());
}

fn print_json_output(records: &[MigrationRecord]) -> Result<()> {
    let output =
        serde_json::to_string_pretty(records).context("Failed to serialize JSON output")?;
    println!("{output}");
    Ok(())
}
