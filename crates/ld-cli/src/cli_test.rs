use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_migrate_target_and_globals() {
    let cli = Cli::try_parse_from([
        "ladder",
        "migrate",
        "--to",
        "1.2.0",
        "--allow-downgrade",
        "-p",
        "proj",
    ])
    .unwrap();
    assert!(cli.global.allow_downgrade);
    assert_eq!(cli.global.project_dir, "proj");
    match cli.command {
        Commands::Migrate(args) => assert_eq!(args.to.as_deref(), Some("1.2.0")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_status_json_flag() {
    let cli = Cli::try_parse_from(["ladder", "status", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Status(StatusArgs { json: true })));
}

#[test]
fn test_verify_takes_no_args() {
    assert!(Cli::try_parse_from(["ladder", "verify", "--to", "1.0.0"]).is_err());
}
