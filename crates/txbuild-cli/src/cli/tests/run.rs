//! Tests for the run subcommand and global flags.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run() {
    match parse(&["txbuild", "run"]) {
        CliCommand::Run {
            dry_run,
            json,
            symbols,
        } => {
            assert!(!dry_run);
            assert!(!json);
            assert!(symbols.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_dry_run_json_symbols() {
    match parse(&[
        "txbuild",
        "run",
        "--dry-run",
        "--json",
        "--symbols",
        "/tmp/genes.txt",
    ]) {
        CliCommand::Run {
            dry_run,
            json,
            symbols,
        } => {
            assert!(dry_run);
            assert!(json);
            assert_eq!(symbols.as_deref(), Some(Path::new("/tmp/genes.txt")));
        }
        _ => panic!("expected Run with flags"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "txbuild",
        "run",
        "--config",
        "/etc/txbuild.toml",
        "--log-file",
        "/var/log/txbuild.log",
        "-q",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/txbuild.toml")));
    assert_eq!(cli.log_file.as_deref(), Some(Path::new("/var/log/txbuild.log")));
    assert!(cli.quiet);
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["txbuild"]).is_err());
}
