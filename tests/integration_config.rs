// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use chore_rs::config::Config;
use chore_rs::config::types::HelpSource;
use chore_rs::help::HelpEntry;
use chore_rs::task::TaskAction;
use chore_rs::task::registry::TaskRegistry;

const PROJECT_TOML: &str = r#"
## Project tasks
##
## ship: build and publish a release

[global]
output_log_level = 3

[paths]
build = "out"
bin = "out/bin"

[tools]
linter = "staticcheck"

[target]
os = "linux"
arch = "arm64"

[audit]
tasks = ["vet", "lint", "test"]

[export.vars]
CGO_ENABLED = "0"

[aliases]
ci = ["audit", "build"]
check = ["fmt", "vet"]

[tasks.test]
section = "QUALITY"
description = "run the test suite"
run = ["${GO} test ./..."]

[tasks.build]
section = "BUILD"
description = "compile the binary"
run = ["${GO} build -o ${BIN_DIR}/app ."]

[tasks.tidy]
enabled = false
"#;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_minimal() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.paths.build, PathBuf::from("build"));
    assert!(config.tasks.is_empty());
    assert!(config.aliases.is_empty());
}

#[test]
fn config_parse_project() {
    let config = Config::parse(PROJECT_TOML).unwrap();

    assert_eq!(config.global.output_log_level.as_u8(), 3);
    assert_eq!(config.paths.bin, PathBuf::from("out/bin"));
    assert_eq!(config.target.arch.as_deref(), Some("arm64"));
    assert_eq!(config.export.vars["CGO_ENABLED"], "0");
    assert_eq!(config.aliases["ci"], ["audit", "build"]);
    assert_eq!(config.tasks.len(), 3);
}

#[test]
fn config_parse_invalid_toml() {
    assert!(Config::parse("[paths\nbuild = ").is_err());
}

// =============================================================================
// Task table from configuration
// =============================================================================

#[test]
fn config_tasks_extend_builtin_table() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let registry = TaskRegistry::from_config(&config).unwrap();

    let test = registry.get("test").unwrap();
    assert_eq!(test.section, "QUALITY");
    assert!(test.log);

    let audit = registry.get("audit").unwrap();
    assert_eq!(
        audit.action,
        TaskAction::aggregate(["vet", "lint", "test"])
    );

    assert!(!registry.get("tidy").unwrap().enabled);

    let names: Vec<&str> = registry.tasks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names[names.len() - 2..], ["test", "build"]);
}

#[test]
fn config_tasks_keep_declaration_order() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let declared: Vec<&str> = config.tasks.iter().map(|(name, _)| name).collect();
    assert_eq!(declared, ["test", "build", "tidy"]);
}

#[test]
fn config_help_lists_each_section_once() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let registry = TaskRegistry::from_config(&config).unwrap();
    let entries = chore_rs::help::entries_from_registry(&registry);

    let headers: Vec<&str> = entries
        .iter()
        .filter_map(|entry| match entry {
            HelpEntry::Row { name, description } if name.is_empty() => Some(description.as_str()),
            _ => None,
        })
        .collect();
    let mut unique = headers.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(headers.len(), unique.len(), "{headers:?}");

    let quality = headers.iter().position(|h| *h == "QUALITY").unwrap();
    let build = headers.iter().position(|h| *h == "BUILD").unwrap();
    assert!(quality < build);

    let names: Vec<&str> = entries.iter().map(HelpEntry::name).collect();
    let test = names.iter().position(|n| *n == "test").unwrap();
    let audit = names.iter().position(|n| *n == "audit").unwrap();
    assert_eq!(test, audit + 1, "test must join the QUALITY group");
}

#[test]
fn config_aliases_resolve_through_registry() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let registry = TaskRegistry::from_config(&config).unwrap();

    let names = registry
        .resolve(&["check".to_string(), "ci".to_string()])
        .unwrap();
    assert_eq!(names, ["fmt", "vet", "audit", "build"]);
}

#[test]
fn config_template_vars_follow_settings() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let vars = config.template_vars();

    assert_eq!(vars["LINTER"], "staticcheck");
    assert_eq!(vars["BIN_DIR"], "out/bin");
    assert_eq!(vars["TARGET_OS"], "linux");
    assert_eq!(vars["AUDIT_TASKS"], "vet lint test");
}

// =============================================================================
// Layered files
// =============================================================================

#[test]
fn config_file_layers_and_help_comments() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("chore.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&project, PROJECT_TOML).unwrap();
    std::fs::write(
        &local,
        "[help]\nsource = \"comments\"\n[tools]\nlinter = \"revive\"\n",
    )
    .unwrap();

    let loader = Config::builder()
        .add_toml_file_optional(&project)
        .add_toml_file(&local);
    let files = loader.loaded_files();
    let config = loader.build().unwrap();

    assert_eq!(files, [project, local]);
    assert_eq!(config.tools.linter, "revive");
    assert_eq!(config.paths.build, PathBuf::from("out"));
    assert_eq!(config.help.source, HelpSource::Comments);

    let entries = chore_rs::help::extract_from_files(&files).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].name(), "ship");
}

#[test]
fn config_options_listing_covers_tasks() {
    let config = Config::parse(PROJECT_TOML).unwrap();
    let options = config.format_options();

    assert!(options.iter().any(|line| line.starts_with("tasks.test.run ")));
    assert!(options.iter().any(|line| line.starts_with("aliases.ci ")));
    assert!(
        options
            .iter()
            .any(|line| line.starts_with("export.vars.CGO_ENABLED "))
    );
}
