// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task override merging.
//!
//! ```text
//! built-in TaskSpec + [tasks.<name>] TaskOverride --> field-by-field merge
//! no built-in       + [tasks.<name>] TaskOverride --> new TaskSpec
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.
//! `run` turns the task into a shell task; `needs` into an aggregate.
//!
//! [`TaskTable`] keeps `[tasks.*]` in declaration order, so new tasks are
//! registered and listed in the order the file declares them.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChoreError, ConfigError, Result};
use crate::task::{TaskAction, TaskSpec};

/// Section used for tasks defined only in configuration.
pub const DEFAULT_SECTION: &str = "PROJECT";

/// Task definition with optional fields for field-level merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Shell commands, run in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<Vec<String>>,
    /// Aggregate members, run in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs: Option<Vec<String>>,
    /// Print start and result markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Omit from the help listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

/// `[tasks.<name>]` tables in declaration order.
///
/// A name declared twice keeps its first position and its last value.
#[derive(Debug, Clone, Default)]
pub struct TaskTable(Vec<(String, TaskOverride)>);

impl TaskTable {
    /// Adds or replaces the override for `name`.
    pub fn insert(&mut self, name: impl Into<String>, task: TaskOverride) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = task,
            None => self.0.push((name, task)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TaskOverride> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, task)| task)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskOverride)> {
        self.0.iter().map(|(name, task)| (name.as_str(), task))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TaskTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for TaskTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TaskTableVisitor;

        impl<'de> Visitor<'de> for TaskTableVisitor {
            type Value = TaskTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of task definitions")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut table = TaskTable::default();
                while let Some((name, task)) = map.next_entry::<String, TaskOverride>()? {
                    table.insert(name, task);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TaskTableVisitor)
    }
}

fn invalid(name: &str, key: &str, message: &str) -> anyhow::Error {
    ChoreError::from(ConfigError::InvalidValue {
        section: format!("tasks.{name}"),
        key: key.to_string(),
        message: message.to_string(),
    })
    .into()
}

impl TaskOverride {
    /// The replacement action, if `run` or `needs` is set.
    fn action(&self, name: &str) -> Result<Option<TaskAction>> {
        match (&self.run, &self.needs) {
            (Some(_), Some(_)) => Err(invalid(name, "run", "'run' and 'needs' are exclusive")),
            (Some(run), None) if run.is_empty() => {
                Err(invalid(name, "run", "must list at least one command"))
            }
            (Some(run), None) => Ok(Some(TaskAction::shell(run.iter().cloned()))),
            (None, Some(needs)) => Ok(Some(TaskAction::Aggregate {
                members: needs.clone(),
            })),
            (None, None) => Ok(None),
        }
    }
}

/// Merges an override over a built-in task, or defines a new one.
///
/// # Errors
///
/// Returns [`ConfigError::MissingKey`] when a new task sets neither `run`
/// nor `needs`, and [`ConfigError::InvalidValue`] when both are set or
/// `run` is empty.
pub fn merge_task_spec(
    name: &str,
    base: Option<&TaskSpec>,
    override_spec: &TaskOverride,
) -> Result<TaskSpec> {
    let action = override_spec.action(name)?;

    let mut spec = match (base, action) {
        (Some(base), action) => {
            let mut spec = base.clone();
            if let Some(action) = action {
                spec.log = action.logs_by_default();
                spec.action = action;
            }
            spec
        }
        (None, Some(action)) => TaskSpec::new(name, DEFAULT_SECTION, "", action),
        (None, None) => {
            return Err(ChoreError::from(ConfigError::MissingKey {
                section: format!("tasks.{name}"),
                key: "run".to_string(),
            })
            .into());
        }
    };

    if let Some(description) = &override_spec.description {
        spec.description.clone_from(description);
    }
    if let Some(section) = &override_spec.section {
        spec.section.clone_from(section);
    }
    spec.log = override_spec.log.unwrap_or(spec.log);
    spec.enabled = override_spec.enabled.unwrap_or(spec.enabled);
    spec.hidden = override_spec.hidden.unwrap_or(spec.hidden);

    Ok(spec)
}
