// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use clap::{CommandFactory, Parser};

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_command_runs_help() {
    let cli = Cli::try_parse_from(["chore"]).unwrap();
    assert!(cli.command.is_none());
    match cli.command_or_default() {
        Command::Run(args) => assert_eq!(args.items, ["help"]),
        other => panic!("unexpected default command {other:?}"),
    }
}

#[test]
fn test_parse_run_splits_assignments() {
    let cli = Cli::try_parse_from(["chore", "run", "fmt", "GO=go1.22", "lint", "FLAGS=-v -x"])
        .unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run");
    };

    assert_eq!(args.tasks(), ["fmt", "lint"]);
    assert_eq!(
        args.assignments().collect::<Vec<_>>(),
        ["GO=go1.22", "FLAGS=-v -x"]
    );
}

#[test]
fn test_parse_run_requires_items() {
    assert!(Cli::try_parse_from(["chore", "run"]).is_err());
}

#[test]
fn test_parse_global_options_after_command() {
    let cli = Cli::try_parse_from([
        "chore",
        "--config",
        "ci.toml",
        "-c",
        "local.toml",
        "run",
        "--dry",
        "-l",
        "4",
        "--platform",
        "windows",
        "-s",
        "paths.bin=out",
        "audit",
    ])
    .unwrap();

    let global = &cli.global;
    assert_eq!(
        global.configs,
        [PathBuf::from("ci.toml"), PathBuf::from("local.toml")]
    );
    assert!(global.dry);
    assert_eq!(global.log_level, Some(4));
    assert_eq!(global.platform.as_deref(), Some("windows"));
    assert_eq!(global.options, ["paths.bin=out"]);
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["chore", "-l", "7", "version"]).is_err());
}

#[test]
fn test_to_config_overrides() {
    let cli = Cli::try_parse_from([
        "chore",
        "-s",
        "tools.go=go1.22",
        "-l",
        "3",
        "--log-file",
        "chore.log",
        "--dry",
        "--platform",
        "msys",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "tools.go=go1.22",
            "global/output_log_level=3",
            "global/file_log_level=3",
            "global/log_file=chore.log",
            "global/dry=true",
            "global/platform=msys",
        ]
    );
}

#[test]
fn test_parse_help_and_list() {
    let cli = Cli::try_parse_from(["chore", "help", "--from", "Makefile", "--from", "extra.mk"])
        .unwrap();
    let Some(Command::Help(args)) = cli.command else {
        panic!("expected help");
    };
    assert_eq!(
        args.from,
        [PathBuf::from("Makefile"), PathBuf::from("extra.mk")]
    );

    let cli = Cli::try_parse_from(["chore", "list", "--json", "no-*"]).unwrap();
    let Some(Command::List(args)) = cli.command else {
        panic!("expected list");
    };
    assert!(args.json);
    assert!(!args.aliases);
    assert_eq!(args.patterns, ["no-*"]);
}
