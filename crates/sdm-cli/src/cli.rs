//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// sdm - apply and track SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "sdm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Print every executed statement
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (DuckDB file or :memory:)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the migration history table if missing
    Init,

    /// Run a migration's up script and record its version
    Apply(ApplyArgs),

    /// Run a migration's down script and remove its version
    Rollback(RollbackArgs),

    /// Print the most recently applied version
    Current,

    /// List every recorded version
    Versions,

    /// Show the full migration history
    History(HistoryArgs),

    /// Print the statements a script splits into
    Split(SplitArgs),
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Version to record
    #[arg(long)]
    pub version: String,

    /// Migration name
    #[arg(short, long)]
    pub name: String,

    /// File holding the up script
    #[arg(short, long)]
    pub up: String,

    /// File holding the down script, stored for later rollback
    #[arg(long)]
    pub down: Option<String>,

    /// Label to attach to the version
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Version to roll back
    #[arg(long)]
    pub version: String,

    /// File holding the down script (default: the stored down script)
    #[arg(long)]
    pub down: Option<String>,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: HistoryOutput,
}

/// History output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutput {
    /// Table format
    Table,
    /// JSON output (includes scripts)
    Json,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL script to split
    pub file: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
