// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, TargetConfig, ToolsConfig,
//!         AuditConfig, ExportConfig, HelpConfig
//! Aliases: alias name → [task list]
//! Vars:    free template variables
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Platform override; skips host detection when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Print commands instead of running them.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            platform: None,
            dry: false,
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Cross-compilation target exported to children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

/// External tool names or paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub go: String,
    pub gofmt: String,
    pub linter: String,
    pub git: String,
    /// Shell program replacing the host default (`/bin/sh`, `pwsh`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            gofmt: "gofmt".to_string(),
            linter: "golangci-lint".to_string(),
            git: "git".to_string(),
            shell: None,
        }
    }
}

/// Members of the `audit` aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub tasks: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            tasks: ["verify", "vet", "lint"].map(String::from).to_vec(),
        }
    }
}

/// Variables exported to every child process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Receives the absolute bin directory.
    pub install_var: String,
    /// Receives `target.os` when set.
    pub os_var: String,
    /// Receives `target.arch` when set.
    pub arch_var: String,
    /// Extra variables, exported verbatim.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            install_var: "GOBIN".to_string(),
            os_var: "GOOS".to_string(),
            arch_var: "GOARCH".to_string(),
            vars: BTreeMap::new(),
        }
    }
}

/// Where `chore help` takes its entries from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpSource {
    /// The task registry.
    #[default]
    Registry,
    /// `##` marker lines in the loaded configuration files.
    Comments,
}

impl fmt::Display for HelpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Comments => write!(f, "comments"),
        }
    }
}

impl std::str::FromStr for HelpSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "registry" => Ok(Self::Registry),
            "comments" => Ok(Self::Comments),
            _ => Err(ConfigError::InvalidValue {
                section: "help".to_string(),
                key: "source".to_string(),
                message: format!("expected 'registry' or 'comments', got '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelpConfig {
    pub source: HelpSource,
}

/// Task aliases mapping alias names to task patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;

/// Free template variables (`NAME=value` overrides and `[vars]`).
pub type Vars = BTreeMap<String, String>;
