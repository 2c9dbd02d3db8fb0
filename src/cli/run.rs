// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task command arguments.
//!
//! ```text
//! chore run fmt lint GO=go1.22 BIN_DIR=out
//!           ^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^
//!           tasks    NAME=value overrides (contain '=')
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::config::vars::is_assignment;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Tasks to run, in order. Aliases and globs like 'no-*' are supported.
    /// Items of the form NAME=value set variables instead.
    #[arg(value_name = "TASK|NAME=VALUE", required = true)]
    pub items: Vec<String>,
}

impl RunArgs {
    /// Task names and patterns, in order.
    #[must_use]
    pub fn tasks(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !is_assignment(item))
            .cloned()
            .collect()
    }

    /// `NAME=value` items, in order.
    pub fn assignments(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| is_assignment(item))
    }
}

/// Arguments for the `help` command.
#[derive(Debug, Clone, Default, Args)]
pub struct HelpArgs {
    /// Reads `##` marker lines from these files instead of listing the
    /// registered tasks.
    #[arg(long = "from", value_name = "FILE", action = clap::ArgAction::Append)]
    pub from: Vec<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Shows aliases instead of tasks.
    #[arg(long)]
    pub aliases: bool,

    /// Prints JSON.
    #[arg(long)]
    pub json: bool,

    /// Only lists tasks matching these names, aliases or globs.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}
