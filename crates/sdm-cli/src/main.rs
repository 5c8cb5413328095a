//! sdm CLI - apply and track SQL schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{apply, current, history, init, rollback, split, versions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init => init::execute(&cli.global),
        cli::Commands::Apply(args) => apply::execute(args, &cli.global),
        cli::Commands::Rollback(args) => rollback::execute(args, &cli.global),
        cli::Commands::Current => current::execute(&cli.global),
        cli::Commands::Versions => versions::execute(&cli.global),
        cli::Commands::History(args) => history::execute(args, &cli.global),
        cli::Commands::Split(args) => split::execute(args, &cli.global),
    }
}
