// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::render::{COLUMN_RENDERER, HelpRenderer, TABLE_RENDERER};
use super::{HelpEntry, entries_from_registry, extract_entries, render_help};
use crate::output::Palette;
use crate::platform::Platform;
use crate::platform::capabilities::HostCapabilities;
use crate::task::registry::TaskRegistry;
use crate::task::{TaskAction, TaskSpec};

const MAKEFILE: &str = "\
## help: print this help message
help:
\t@echo 'Usage:'

##:
##: QUALITY CONTROL
## fmt: format code
fmt:
\tgo fmt ./...

##lint:run linters: fast: strict
##
##  audit  : run quality control checks
# a plain comment
##audit everything at once
";

fn plain(renderer: &dyn HelpRenderer, entries: &[HelpEntry]) -> String {
    renderer.render(entries, &Palette::PLAIN)
}

#[test]
fn test_extract_preserves_order_and_count() {
    let entries = extract_entries(MAKEFILE);
    let marker_lines = MAKEFILE.lines().filter(|l| l.starts_with("##")).count();

    assert_eq!(entries.len(), marker_lines);
    insta::assert_debug_snapshot!(entries, @r#"
    [
        Row {
            name: "help",
            description: "print this help message",
        },
        Blank,
        Row {
            name: "",
            description: "QUALITY CONTROL",
        },
        Row {
            name: "fmt",
            description: "format code",
        },
        Row {
            name: "lint",
            description: "run linters: fast: strict",
        },
        Blank,
        Row {
            name: "audit",
            description: "run quality control checks",
        },
        Row {
            name: "",
            description: "audit everything at once",
        },
    ]
    "#);
}

#[test]
fn test_extract_ignores_other_lines() {
    let source = "# comment\n #indented ## marker\nfmt: ## not at start\n";
    assert!(extract_entries(source).is_empty());
}

#[test]
fn test_blank_markers_with_trailing_whitespace() {
    let entries = extract_entries("##:   \n##   \n");
    assert_eq!(entries, vec![HelpEntry::Blank, HelpEntry::Blank]);
}

#[test]
fn test_column_width_is_longest_name() {
    let entries = vec![
        HelpEntry::row("a", "first"),
        HelpEntry::row("longer-name", "second"),
        HelpEntry::row("", "header"),
    ];
    let text = plain(&COLUMN_RENDERER, &entries);

    assert_eq!(
        text,
        "  a            first\n  longer-name  second\n               header\n"
    );
}

#[test]
fn test_blank_entries_become_single_empty_lines() {
    let entries = vec![
        HelpEntry::row("fmt", "format"),
        HelpEntry::Blank,
        HelpEntry::Blank,
        HelpEntry::row("vet", "vet"),
    ];
    let text = plain(&TABLE_RENDERER, &entries);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines, ["  fmt  format", "", "", "  vet  vet"]);
}

#[test]
fn test_rows_without_description_have_no_trailing_space() {
    let entries = vec![HelpEntry::row("short", ""), HelpEntry::row("much-longer", "x")];
    for renderer in [&COLUMN_RENDERER as &dyn HelpRenderer, &TABLE_RENDERER] {
        let text = plain(renderer, &entries);
        assert!(text.lines().all(|l| l == l.trim_end()), "{}", renderer.name());
    }
}

#[test]
fn test_width_counts_chars_not_bytes() {
    let entries = vec![HelpEntry::row("héllo", "accented"), HelpEntry::row("ab", "plain")];
    let text = plain(&COLUMN_RENDERER, &entries);
    assert_eq!(text, "  héllo  accented\n  ab     plain\n");
}

#[test]
fn test_renderers_agree() {
    let entries = extract_entries(MAKEFILE);
    assert_eq!(
        plain(&COLUMN_RENDERER, &entries),
        plain(&TABLE_RENDERER, &entries)
    );
    assert_eq!(plain(&COLUMN_RENDERER, &[]), plain(&TABLE_RENDERER, &[]));
}

#[test]
fn test_renderers_agree_once_styles_are_stripped() {
    let entries = extract_entries(MAKEFILE);
    let column = COLUMN_RENDERER.render(&entries, &Palette::ANSI);
    let table = TABLE_RENDERER.render(&entries, &Palette::ANSI);

    assert_eq!(column, table);
    assert!(column.contains("\u{1b}["));
}

#[test]
fn test_render_help_starts_with_usage() {
    let host = HostCapabilities::resolve(Platform::Linux).unwrap();
    let entries = [HelpEntry::row("fmt", "format code")];
    let text = render_help(&host, &Palette::PLAIN, &entries);
    assert_eq!(text, "Usage:\n  fmt  format code\n");
}

#[test]
fn test_entries_from_registry_group_sections() {
    let mut registry = TaskRegistry::new(BTreeMap::new());
    registry.register(TaskSpec::new(
        "help",
        "HELPERS",
        "print help",
        TaskAction::Help,
    ));
    registry.register(TaskSpec::new(
        "deps",
        "DEPENDENCIES",
        "download modules",
        TaskAction::shell(["go mod download"]),
    ));
    registry.register(TaskSpec::new(
        "tidy",
        "DEPENDENCIES",
        "tidy modules",
        TaskAction::shell(["go mod tidy -v"]),
    ));
    registry.register(
        TaskSpec::new("secret", "DEPENDENCIES", "hidden", TaskAction::Help).with_hidden(true),
    );

    let entries = entries_from_registry(&registry);
    let text = plain(&COLUMN_RENDERER, &entries);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "",
            "        HELPERS",
            "  help  print help",
            "",
            "        DEPENDENCIES",
            "  deps  download modules",
            "  tidy  tidy modules",
        ]
    );
}

#[test]
fn test_entries_from_registry_merge_interleaved_sections() {
    let mut registry = TaskRegistry::new(BTreeMap::new());
    for (name, section, description) in [
        ("fmt", "QUALITY", "format code"),
        ("build", "BUILD", "compile"),
        ("test", "QUALITY", "run tests"),
    ] {
        registry.register(TaskSpec::new(name, section, description, TaskAction::Help));
    }

    let entries = entries_from_registry(&registry);
    let text = plain(&COLUMN_RENDERER, &entries);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "",
            "         QUALITY",
            "  fmt    format code",
            "  test   run tests",
            "",
            "         BUILD",
            "  build  compile",
        ]
    );
}
