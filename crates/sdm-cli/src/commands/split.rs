//! Split command implementation - shows how a script will be executed

use anyhow::Result;
use sdm_sql::{is_blank, split_statements};

use crate::cli::{GlobalArgs, SplitArgs};
use crate::commands::common::load_workspace;

/// Execute the split command
pub(crate) fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let workspace = load_workspace(global)?;
    let script = workspace.read_script(&args.file)?;

    let statements = split_statements(&script);
    if statements.is_empty() && !is_blank(&script) {
        anyhow::bail!(
            "Invalid SQL syntax in {}: unterminated quote or unbalanced parentheses",
            args.file
        );
    }

    for (i, statement) in statements.iter().enumerate() {
        if global.verbose {
            println!("-- statement {}", i + 1);
        }
        println!("{statement};\n");
    }
    println!(
        "-- {} statement{}",
        statements.len(),
        if statements.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
