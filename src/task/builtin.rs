// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in tasks.
//!
//! ```text
//! HELPERS       help  confirm  no-dirty  no-staged
//! DEPENDENCIES  deps  verify   tidy
//! QUALITY       fmt   lint     vet       audit
//! BUILD         mkdirs clean
//! ```
//!
//! Commands are templates; `${GO}`, `${LINTER}` and friends expand at run
//! time so `GO=go1.22` on the command line reaches every task.

use crate::config::Config;

use super::{TaskAction, TaskSpec};

pub const HELPERS: &str = "HELPERS";
pub const DEPENDENCIES: &str = "DEPENDENCIES";
pub const QUALITY: &str = "QUALITY";
pub const BUILD: &str = "BUILD";

/// The built-in task table, in listing order.
#[must_use]
pub fn builtin_tasks(config: &Config) -> Vec<TaskSpec> {
    let audit_members = config.audit.tasks.clone();
    let audit_description = format!("run quality checks ({})", audit_members.join(", "));

    vec![
        TaskSpec::new("help", HELPERS, "print this help message", TaskAction::Help),
        TaskSpec::new(
            "confirm",
            HELPERS,
            "ask for confirmation before continuing",
            TaskAction::Confirm {
                message: "aborted by user".to_string(),
            },
        ),
        TaskSpec::new(
            "no-dirty",
            HELPERS,
            "fail if the working tree has uncommitted changes",
            TaskAction::RequireEmpty {
                check: "${GIT} status --porcelain".to_string(),
                message: "working tree has uncommitted changes".to_string(),
            },
        ),
        TaskSpec::new(
            "no-staged",
            HELPERS,
            "fail if the index has staged changes",
            TaskAction::RequireEmpty {
                check: "${GIT} diff --cached --name-only".to_string(),
                message: "index has staged changes".to_string(),
            },
        ),
        TaskSpec::new(
            "deps",
            DEPENDENCIES,
            "download module dependencies",
            TaskAction::shell(["${GO} mod download"]),
        ),
        TaskSpec::new(
            "verify",
            DEPENDENCIES,
            "verify module dependencies",
            TaskAction::shell(["${GO} mod verify"]),
        ),
        TaskSpec::new(
            "tidy",
            DEPENDENCIES,
            "add missing and remove unused modules",
            TaskAction::shell(["${GO} mod tidy -v"]),
        ),
        TaskSpec::new(
            "fmt",
            QUALITY,
            "format source code",
            TaskAction::shell(["${GOFMT} -s -w ."]),
        ),
        TaskSpec::new(
            "lint",
            QUALITY,
            "run the linter",
            TaskAction::shell(["${LINTER} run ./..."]),
        ),
        TaskSpec::new(
            "vet",
            QUALITY,
            "examine source code for suspicious constructs",
            TaskAction::shell(["${GO} vet ./..."]),
        ),
        TaskSpec::new(
            "audit",
            QUALITY,
            audit_description,
            TaskAction::Aggregate {
                members: audit_members,
            },
        ),
        TaskSpec::new(
            "mkdirs",
            BUILD,
            "create the build and bin directories",
            TaskAction::MakeDirs,
        ),
        TaskSpec::new(
            "clean",
            BUILD,
            "remove the build and bin directories",
            TaskAction::Clean,
        ),
    ]
}
