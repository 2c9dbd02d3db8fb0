// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for chore-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! chore [global options] <command>
//! run TASK... [NAME=value]...
//! help [--from FILE]...
//! list [--aliases] [--json] [PATTERN]...
//! options
//! sources
//! platform
//! version
//! (no command) --> run help
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::{HelpArgs, ListArgs, RunArgs};
use crate::output::clap_styles;
use clap::{Parser, Subcommand};

/// Cross-platform Project Task Runner
///
/// Runs the common development tasks of a Go module (dependencies,
/// formatting, linting, vetting, cleaning) the same way on Unix-like
/// systems and Windows.
#[derive(Debug, Parser)]
#[command(
    name = "chore",
    author,
    version,
    about = "Cross-platform project task runner",
    long_about = "chore-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs the common development tasks of a project the same way on\n\
                  Unix-like systems and Windows.\n\n\
                  Invoking `chore` alone prints the task listing. Do\n\
                  `chore run <task>... [NAME=value]...` to run tasks. See\n\
                  `chore <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  chore reads `chore.toml` from the current directory unless\n\
                  --no-default-config is given, then every --config file in order,\n\
                  then CHORE_<SECTION>_<KEY> environment variables, then --set\n\
                  options. NAME=value arguments to `run` are applied last.",
    disable_help_subcommand = true,
    styles = clap_styles()
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Runs tasks; `NAME=value` items override variables.
    Run(RunArgs),

    /// Prints the task listing.
    Help(HelpArgs),

    /// Lists task names.
    List(ListArgs),

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Sources,

    /// Shows the detected host platform and backend.
    Platform,

    /// Shows the version.
    Version,
}

impl Cli {
    /// The command to dispatch; no command means `run help`.
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or_else(|| {
            Command::Run(RunArgs {
                items: vec!["help".to_string()],
            })
        })
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
