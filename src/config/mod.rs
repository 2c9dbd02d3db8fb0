// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for chore-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. chore.toml (cwd, skipped with --no-default-config)
//! 3. --config FILE (in order)
//! 4. CHORE_* env vars
//! 5. --set key=value and the other global flags
//! 6. NAME=value run overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CHORE_GLOBAL_DRY=true    → global.dry = true
//! CHORE_PATHS_BIN=out/bin  → paths.bin = "out/bin"
//! CHORE_TOOLS_GO=go1.22    → tools.go = "go1.22"
//! ```
//!
//! # Task Definitions
//!
//! ```toml
//! [tasks.lint]
//! run = ["${LINTER} run --fix ./..."]   # replace a built-in
//!
//! [tasks.build]
//! description = "build the application"
//! section = "BUILD"
//! needs = ["mkdirs", "compile"]         # new aggregate
//! ```

pub mod loader;
pub mod merge;
pub mod paths;
pub mod types;
pub mod vars;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use merge::TaskTable;
use paths::PathsConfig;
use types::{
    Aliases, AuditConfig, ExportConfig, GlobalConfig, HelpConfig, TargetConfig, ToolsConfig, Vars,
};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chore.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CHORE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub paths: PathsConfig,
    pub target: TargetConfig,
    pub tools: ToolsConfig,
    pub audit: AuditConfig,
    pub export: ExportConfig,
    pub help: HelpConfig,
    /// Task aliases.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: Aliases,
    /// Free template variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: Vars,
    /// Per-task overrides and definitions (field-level merging).
    #[serde(skip_serializing_if = "TaskTable::is_empty")]
    pub tasks: TaskTable,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chore_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("chore.toml")
    ///     .with_env_prefix("CHORE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for empty output directories.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.validate()?;
        self.global.platform = self
            .global
            .platform
            .take()
            .filter(|p| !p.trim().is_empty());
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_target_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_export_options(&mut options);
        self.format_task_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.platform".into(),
            self.global.platform.clone().unwrap_or_default(),
        );
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("help.source".into(), self.help.source.to_string());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.build".into(), self.paths.build.display().to_string());
        options.insert("paths.bin".into(), self.paths.bin.display().to_string());
    }

    fn format_target_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "target.os".into(),
            self.target.os.clone().unwrap_or_default(),
        );
        options.insert(
            "target.arch".into(),
            self.target.arch.clone().unwrap_or_default(),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.go".into(), self.tools.go.clone());
        options.insert("tools.gofmt".into(), self.tools.gofmt.clone());
        options.insert("tools.linter".into(), self.tools.linter.clone());
        options.insert("tools.git".into(), self.tools.git.clone());
        if let Some(shell) = &self.tools.shell {
            options.insert("tools.shell".into(), shell.clone());
        }
    }

    fn format_export_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("export.install_var".into(), self.export.install_var.clone());
        options.insert("export.os_var".into(), self.export.os_var.clone());
        options.insert("export.arch_var".into(), self.export.arch_var.clone());
        for (name, value) in &self.export.vars {
            options.insert(format!("export.vars.{name}"), value.clone());
        }
        for (name, value) in &self.vars {
            options.insert(format!("vars.{name}"), value.clone());
        }
    }

    fn format_task_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("audit.tasks".into(), self.audit.tasks.join(" "));
        for (alias, targets) in &self.aliases {
            options.insert(format!("aliases.{alias}"), targets.join(" "));
        }
        for (name, task) in self.tasks.iter() {
            if let Some(run) = &task.run {
                options.insert(format!("tasks.{name}.run"), run.join(" && "));
            }
            if let Some(needs) = &task.needs {
                options.insert(format!("tasks.{name}.needs"), needs.join(" "));
            }
            if let Some(enabled) = task.enabled {
                options.insert(format!("tasks.{name}.enabled"), enabled.to_string());
            }
        }
    }
}
