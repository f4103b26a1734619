use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_check_with_adhoc_facts() {
    let cli = Cli::try_parse_from([
        "mc",
        "check",
        "--file",
        "m.sql",
        "--table",
        "projects",
        "--table",
        "segments",
        "--rls",
        "--extension",
        "vector",
        "-o",
        "json",
    ])
    .unwrap();
    let Commands::Check(args) = cli.command else {
        panic!("expected check");
    };
    assert_eq!(args.file, Some(PathBuf::from("m.sql")));
    assert_eq!(args.tables, vec!["projects", "segments"]);
    assert!(args.rls);
    assert_eq!(args.extensions, vec!["vector"]);
    assert_eq!(args.output, OutputFormat::Json);
    assert!(args.schema.is_none());
}

#[test]
fn test_rls_requires_table() {
    assert!(Cli::try_parse_from(["mc", "check", "--file", "m.sql", "--rls"]).is_err());
}

#[test]
fn test_parse_apply() {
    let cli = Cli::try_parse_from([
        "mc",
        "-p",
        "proj",
        "apply",
        "db/003.sql",
        "--dry-run",
        "--check",
        "gmail",
    ])
    .unwrap();
    assert_eq!(cli.global.project_dir, PathBuf::from("proj"));
    let Commands::Apply(args) = cli.command else {
        panic!("expected apply");
    };
    assert!(args.dry_run);
    assert_eq!(args.check.as_deref(), Some("gmail"));
    assert!(args.project_ref.is_none());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["mc", "ls", "--verbose", "--config", "alt.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config, Some(PathBuf::from("alt.yml")));
}
