// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task dispatch.
//!
//! # Architecture
//!
//! ```text
//! builtin tasks + [tasks.*] overrides
//!              |
//!              v
//!        TaskRegistry ----resolve(aliases, globs)----> [names]
//!              |                                         |
//!              v                                         v
//!        TaskManager::run_all ------------------> InvocationContext
//!              |                                  (config, host, env, cancel)
//!              v
//!         TaskAction
//!   Shell | Aggregate | Help | Confirm | RequireEmpty | Clean | MakeDirs
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TaskSpec`] | Declarative task: name, section, description, action |
//! | [`TaskAction`] | What running the task does |
//! | [`registry::TaskRegistry`] | Declaration-ordered tasks plus aliases |
//! | [`manager::TaskManager`] | Sequential, run-once execution |
//! | [`InvocationContext`] | Everything resolved once per invocation |

pub mod builtin;
pub mod context;
pub mod manager;
pub mod registry;

use serde::Serialize;

pub use context::InvocationContext;

/// What a task does when it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskAction {
    /// Command templates run in order through the host shell.
    Shell { commands: Vec<String> },
    /// Other tasks run in order; the first failure stops the rest.
    Aggregate { members: Vec<String> },
    /// Prints the help listing.
    Help,
    /// Asks for confirmation and fails unless it is given.
    Confirm { message: String },
    /// Fails if the check command prints anything.
    RequireEmpty { check: String, message: String },
    /// Removes the build and bin directories.
    Clean,
    /// Creates the build and bin directories.
    MakeDirs,
}

impl TaskAction {
    /// A shell action from command templates.
    pub fn shell<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Shell {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// An aggregate over other task names.
    pub fn aggregate<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Aggregate {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Actions that spawn tools print start and result markers by default.
    #[must_use]
    pub const fn logs_by_default(&self) -> bool {
        matches!(self, Self::Shell { .. } | Self::Clean | Self::MakeDirs)
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Shell { .. } => "shell",
            Self::Aggregate { .. } => "aggregate",
            Self::Help => "help",
            Self::Confirm { .. } => "confirm",
            Self::RequireEmpty { .. } => "require-empty",
            Self::Clean => "clean",
            Self::MakeDirs => "make-dirs",
        }
    }
}

/// A registered task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSpec {
    pub name: String,
    /// Help-listing group the task appears under.
    pub section: String,
    pub description: String,
    pub action: TaskAction,
    /// Print `==> name` before and `✓ name` / `✗ name` after.
    pub log: bool,
    pub enabled: bool,
    /// Left out of the help listing; still runnable.
    pub hidden: bool,
}

impl TaskSpec {
    pub fn new(
        name: impl Into<String>,
        section: impl Into<String>,
        description: impl Into<String>,
        action: TaskAction,
    ) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            description: description.into(),
            log: action.logs_by_default(),
            action,
            enabled: true,
            hidden: false,
        }
    }

    #[must_use]
    pub const fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Shown in the help listing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.enabled && !self.hidden
    }
}
