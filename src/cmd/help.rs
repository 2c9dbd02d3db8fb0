// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Help command implementation.
//!
//! ```text
//! --from FILE...        --> ## lines of those files
//! help.source=registry  --> visible registered tasks
//! help.source=comments  --> ## lines of the loaded config files
//! ```

use std::path::PathBuf;

use crate::cli::run::HelpArgs;
use crate::config::Config;
use crate::config::types::HelpSource;
use crate::error::Result;
use crate::help::{HelpEntry, entries_from_registry, extract_from_files, print_help};
use crate::output::Console;
use crate::platform::capabilities::HostCapabilities;
use crate::task::registry::TaskRegistry;

/// Main handler for help command.
///
/// # Errors
///
/// Returns an error if a help source cannot be read or the task table is
/// invalid.
pub fn run_help_command(
    args: &HelpArgs,
    config: &Config,
    host: &HostCapabilities,
    loaded_files: &[PathBuf],
) -> Result<()> {
    let entries = help_entries(args, config, loaded_files)?;
    print_help(host, &Console::new(host.palette()), &entries);
    Ok(())
}

/// Entries the help command prints.
///
/// # Errors
///
/// Returns an error if a help source cannot be read or the task table is
/// invalid.
pub fn help_entries(
    args: &HelpArgs,
    config: &Config,
    loaded_files: &[PathBuf],
) -> Result<Vec<HelpEntry>> {
    if !args.from.is_empty() {
        return extract_from_files(&args.from);
    }

    match config.help.source {
        HelpSource::Registry => Ok(entries_from_registry(&TaskRegistry::from_config(config)?)),
        HelpSource::Comments => extract_from_files(loaded_files),
    }
}
