// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --dry             ← Print commands instead of running them
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --platform NAME   ← global.platform override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: NAME=value > CLI flags > --set > env > --config > chore.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub configs: Vec<PathBuf>,

    /// Disables loading `chore.toml` from the current directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Prints the commands tasks would run without running them.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6), global = true)]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6), global = true)]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Skips host detection and uses this platform name verbatim.
    #[arg(long = "platform", value_name = "NAME", global = true)]
    pub platform: Option<String>,

    /// Sets an option, such as 'paths.bin=out/bin' or 'tools/linter=revive'.
    /// Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "OPTION",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    ///
    /// Flags come after `--set` so they win over it.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global/output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global/file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global/log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global/dry=true".to_string());
        }

        if let Some(ref platform) = self.platform {
            overrides.push(format!("global/platform={platform}"));
        }

        overrides
    }
}
