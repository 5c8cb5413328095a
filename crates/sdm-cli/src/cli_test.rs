use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn parse_apply() {
    let cli = Cli::try_parse_from([
        "sdm",
        "apply",
        "--version",
        "20240101120000",
        "--name",
        "add_users",
        "--up",
        "up.sql",
        "--label",
        "release-1",
    ])
    .unwrap();

    let Commands::Apply(args) = cli.command else {
        panic!("expected apply");
    };
    assert_eq!(args.version, "20240101120000");
    assert_eq!(args.name, "add_users");
    assert_eq!(args.up, "up.sql");
    assert_eq!(args.down, None);
    assert_eq!(args.label.as_deref(), Some("release-1"));
}

#[test]
fn parse_global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["sdm", "current", "--database", "db.duckdb", "-v"]).unwrap();
    assert!(matches!(cli.command, Commands::Current));
    assert_eq!(cli.global.database.as_deref(), Some("db.duckdb"));
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, ".");
}

#[test]
fn parse_history_output() {
    let cli = Cli::try_parse_from(["sdm", "history", "--output", "json"]).unwrap();
    let Commands::History(args) = cli.command else {
        panic!("expected history");
    };
    assert_eq!(args.output, HistoryOutput::Json);

    let cli = Cli::try_parse_from(["sdm", "history"]).unwrap();
    let Commands::History(args) = cli.command else {
        panic!("expected history");
    };
    assert_eq!(args.output, HistoryOutput::Table);
}

#[test]
fn apply_requires_version_and_up() {
    assert!(Cli::try_parse_from(["sdm", "apply", "--name", "x", "--up", "u.sql"]).is_err());
    assert!(Cli::try_parse_from(["sdm", "apply", "--version", "1", "--name", "x"]).is_err());
}
