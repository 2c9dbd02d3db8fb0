// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task registry for resolving task names and aliases.
//!
//! ```text
//! input ["check", "v*"]
//!   resolve_aliases: "check" --> [fmt, vet]
//!   match_pattern:   "v*"    --> [verify, vet]
//!   dedupe + preserve order --> [fmt, vet, verify]
//! ```
//!
//! Tasks keep declaration order; re-registering a name replaces the task
//! in place.

use std::collections::BTreeSet;

use anyhow::Context;
use tracing::{debug, trace};
use wax::{Glob, Program};

use crate::config::Config;
use crate::config::merge::{TaskTable, merge_task_spec};
use crate::config::types::Aliases;
use crate::error::{ChoreError, Result, TaskError};

use super::TaskSpec;
use super::builtin::builtin_tasks;

/// Registry for looking up tasks by name or pattern.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    /// Tasks in declaration order.
    tasks: Vec<TaskSpec>,

    /// Aliases mapping names to task lists.
    aliases: Aliases,
}

impl TaskRegistry {
    #[must_use]
    pub const fn new(aliases: Aliases) -> Self {
        Self {
            tasks: Vec::new(),
            aliases,
        }
    }

    /// Built-in tasks with the configured overrides and aliases applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a `[tasks.<name>]` entry is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new(config.aliases.clone());
        registry.register_all(builtin_tasks(config));
        registry.apply_overrides(&config.tasks)?;
        debug!(tasks = registry.tasks.len(), "task registry ready");
        Ok(registry)
    }

    /// Registers a task, replacing any task of the same name in place.
    pub fn register(&mut self, spec: TaskSpec) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.name == spec.name) {
            *existing = spec;
        } else {
            self.tasks.push(spec);
        }
    }

    pub fn register_all(&mut self, specs: impl IntoIterator<Item = TaskSpec>) {
        for spec in specs {
            self.register(spec);
        }
    }

    /// Merges `[tasks.<name>]` entries over the registered tasks.
    ///
    /// # Errors
    ///
    /// Returns the first invalid override.
    pub fn apply_overrides(&mut self, overrides: &TaskTable) -> Result<()> {
        for (name, override_spec) in overrides.iter() {
            let spec = merge_task_spec(name, self.get(name), override_spec)?;
            trace!(task = %name, action = spec.action.kind(), "applied task override");
            self.register(spec);
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tasks in declaration order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    /// Tasks shown in the help listing.
    pub fn visible(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.iter().filter(|t| t.is_visible())
    }

    #[must_use]
    pub const fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Resolves aliases in a list of task patterns.
    ///
    /// Nested aliases expand recursively; non-alias patterns are returned
    /// as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Cycle`] if an alias expands to itself.
    pub fn resolve_aliases(&self, patterns: &[String]) -> Result<Vec<String>> {
        let mut result = Vec::new();
        let mut stack = Vec::new();
        self.expand_aliases(patterns, &mut stack, &mut result)?;
        Ok(result)
    }

    fn expand_aliases(
        &self,
        patterns: &[String],
        stack: &mut Vec<String>,
        out: &mut Vec<String>,
    ) -> Result<()> {
        for pattern in patterns {
            let Some(targets) = self.aliases.get(pattern) else {
                out.push(pattern.clone());
                continue;
            };

            if stack.contains(pattern) {
                let chain = stack
                    .iter()
                    .chain(std::iter::once(pattern))
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ChoreError::from(TaskError::Cycle {
                    task: pattern.clone(),
                    chain,
                })
                .into());
            }

            stack.push(pattern.clone());
            self.expand_aliases(targets, stack, out)?;
            stack.pop();
        }
        Ok(())
    }

    /// Matches a glob pattern against registered task names.
    ///
    /// An exact name always matches itself; globs skip disabled tasks.
    ///
    /// # Examples
    ///
    /// - `"*"` matches all tasks
    /// - `"no-*"` matches "no-dirty" and "no-staged"
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        if self.contains(pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob =
            Glob::new(pattern).with_context(|| format!("invalid task pattern: {pattern}"))?;

        Ok(self
            .tasks
            .iter()
            .filter(|t| t.enabled && glob.is_match(t.name.as_str()))
            .map(|t| t.name.clone())
            .collect())
    }

    /// Resolves task names, aliases and patterns to registered task names.
    ///
    /// This method:
    /// 1. Expands aliases
    /// 2. Matches glob patterns
    /// 3. Deduplicates results
    /// 4. Preserves order
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for a pattern that matches nothing,
    /// or an error for an invalid glob or an alias cycle.
    pub fn resolve(&self, specs: &[String]) -> Result<Vec<String>> {
        let expanded = self.resolve_aliases(specs)?;

        let mut result = Vec::new();
        let mut seen = BTreeSet::new();

        for pattern in &expanded {
            let matches = self.match_pattern(pattern)?;

            if matches.is_empty() {
                return Err(ChoreError::from(TaskError::NotFound(pattern.clone())).into());
            }

            for name in matches {
                if seen.insert(name.clone()) {
                    result.push(name);
                }
            }
        }

        trace!(?specs, resolved = ?result, "resolved tasks");
        Ok(result)
    }
}
