// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::help::help_entries;
use super::list::list_lines;
use super::platform::{platform_lines, resolve_host};
use crate::cli::run::{HelpArgs, ListArgs};
use crate::config::Config;
use crate::config::types::HelpSource;
use crate::error::{ChoreError, PlatformError, Result};
use crate::help::HelpEntry;
use crate::platform::Platform;
use crate::platform::capabilities::BackendKind;
use crate::platform::detect::{DetectionSource, HostProbe};

struct StaticProbe(Option<&'static str>);

impl HostProbe for StaticProbe {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    async fn system_name(&self) -> Result<Option<String>> {
        Ok(self.0.map(ToString::to_string))
    }
}

fn list_args(patterns: &[&str]) -> ListArgs {
    ListArgs {
        patterns: patterns.iter().map(ToString::to_string).collect(),
        ..ListArgs::default()
    }
}

#[test]
fn test_list_all_tasks_in_declaration_order() {
    let lines = list_lines(&ListArgs::default(), &Config::default()).unwrap();
    assert_eq!(lines.first().map(String::as_str), Some("help"));
    assert_eq!(lines.last().map(String::as_str), Some("clean"));
    assert!(lines.contains(&"audit".to_string()));
}

#[test]
fn test_list_filters_by_pattern() {
    let lines = list_lines(&list_args(&["no-*", "fmt"]), &Config::default()).unwrap();
    assert_eq!(lines, ["no-dirty", "no-staged", "fmt"]);
}

#[test]
fn test_list_unknown_pattern_fails() {
    let args = list_args(&["deploy"]);
    assert!(list_lines(&args, &Config::default()).is_err());
}

#[test]
fn test_list_marks_disabled_tasks() {
    let config = Config::parse("[tasks.lint]\nenabled = false\n").unwrap();
    let lines = list_lines(&list_args(&["lint"]), &config).unwrap();
    assert_eq!(lines, ["lint (disabled)"]);
}

#[test]
fn test_list_aliases() {
    let args = ListArgs {
        aliases: true,
        ..ListArgs::default()
    };
    let lines = list_lines(&args, &Config::default()).unwrap();
    assert_eq!(lines, ["No aliases defined"]);

    let config = Config::parse("[aliases]\ncheck = [\"fmt\", \"vet\"]\n").unwrap();
    let lines = list_lines(&args, &config).unwrap();
    assert_eq!(lines, ["check = fmt, vet"]);
}

#[test]
fn test_list_json() {
    let args = ListArgs {
        json: true,
        ..list_args(&["vet"])
    };
    let lines = list_lines(&args, &Config::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();

    assert_eq!(value[0]["name"], "vet");
    assert_eq!(value[0]["section"], "QUALITY");
    assert_eq!(value[0]["action"]["kind"], "shell");
}

#[test]
fn test_help_from_registry() {
    let entries = help_entries(&HelpArgs::default(), &Config::default(), &[]).unwrap();
    assert_eq!(entries[0], HelpEntry::Blank);
    assert_eq!(entries[1], HelpEntry::row("", "HELPERS"));
    assert_eq!(entries[2].name(), "help");
}

#[test]
fn test_help_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let makefile = dir.path().join("Makefile");
    std::fs::write(&makefile, "## build: compile\nbuild:\n\tgo build\n").unwrap();

    let args = HelpArgs {
        from: vec![makefile],
    };
    let entries = help_entries(&args, &Config::default(), &[]).unwrap();
    assert_eq!(entries, [HelpEntry::row("build", "compile")]);
}

#[test]
fn test_help_from_loaded_config_comments() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chore.toml");
    std::fs::write(&file, "## ship: release it\n[help]\nsource = 'comments'\n").unwrap();

    let mut config = Config::default();
    config.help.source = HelpSource::Comments;
    let entries = help_entries(&HelpArgs::default(), &config, &[file]).unwrap();
    assert_eq!(entries, [HelpEntry::row("ship", "release it")]);
}

#[test]
fn test_help_missing_file_fails() {
    let args = HelpArgs {
        from: vec![PathBuf::from("/definitely/not/here/Makefile")],
    };
    assert!(help_entries(&args, &Config::default(), &[]).is_err());
}

#[tokio::test]
async fn test_resolve_host_from_system_name() {
    let (detection, host) = resolve_host(&Config::default(), &StaticProbe(Some("Linux")))
        .await
        .unwrap();
    assert_eq!(detection.platform, Platform::Linux);
    assert_eq!(host.kind(), BackendKind::Posix);

    let lines = platform_lines(&detection, &host);
    assert_eq!(lines[0], "platform = Linux");
    assert_eq!(lines[1], "source   = system command (Linux)");
    assert_eq!(lines[2], "backend  = posix");
}

#[tokio::test]
async fn test_resolve_host_honours_override_and_shell() {
    let mut config = Config::default();
    config.global.platform = Some("windows".to_string());
    config.tools.shell = Some("pwsh".to_string());

    let (detection, host) = resolve_host(&config, &StaticProbe(None)).await.unwrap();
    assert_eq!(detection.source, DetectionSource::Override);
    assert_eq!(host.kind(), BackendKind::Windows);
    assert_eq!(host.shell().program, "pwsh");
}

#[tokio::test]
async fn test_resolve_host_fails_fast_when_undetected() {
    let err = resolve_host(&Config::default(), &StaticProbe(None))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChoreError>(),
        Some(ChoreError::Platform(inner)) if matches!(**inner, PlatformError::Unrecognized { .. })
    ));
}
