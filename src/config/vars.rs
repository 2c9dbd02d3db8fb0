// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `NAME=value` run overrides and the template variable table.
//!
//! ```text
//! PLATFORM     --> global.platform
//! BUILD_DIR    --> paths.build         BIN_DIR  --> paths.bin
//! TARGET_OS    --> target.os           TARGET_ARCH --> target.arch
//! AUDIT_TASKS  --> audit.tasks (comma or whitespace separated)
//! GO GOFMT LINTER GIT --> tools.*
//! anything else --> vars.NAME
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::Config;
use super::types::Vars;
use crate::error::{ChoreError, ConfigError, Result};

/// Variable names accepted on the command line.
static NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok());

/// A parsed `NAME=value` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// Returns true if `item` looks like an assignment rather than a task name.
#[must_use]
pub fn is_assignment(item: &str) -> bool {
    item.contains('=')
}

/// Splits `NAME=value` on the first `=`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] if there is no `=` or the name
/// is not an identifier.
pub fn parse_assignment(item: &str) -> Result<Assignment> {
    let invalid = || ChoreError::from(ConfigError::InvalidOverride(item.to_string()));

    let (name, value) = item.split_once('=').ok_or_else(invalid)?;
    let valid = NAME_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name));
    if !valid {
        return Err(invalid().into());
    }

    Ok(Assignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Applies run overrides on top of every other configuration layer.
    pub fn apply_assignments(&mut self, assignments: &[Assignment]) {
        for Assignment { name, value } in assignments {
            debug!(name = %name, value = %value, "run override");
            match name.as_str() {
                "PLATFORM" => self.global.platform = non_empty(value),
                "BUILD_DIR" => self.paths.build = value.into(),
                "BIN_DIR" => self.paths.bin = value.into(),
                "TARGET_OS" => self.target.os = non_empty(value),
                "TARGET_ARCH" => self.target.arch = non_empty(value),
                "AUDIT_TASKS" => self.audit.tasks = split_list(value),
                "GO" => self.tools.go.clone_from(value),
                "GOFMT" => self.tools.gofmt.clone_from(value),
                "LINTER" => self.tools.linter.clone_from(value),
                "GIT" => self.tools.git.clone_from(value),
                _ => {
                    self.vars.insert(name.clone(), value.clone());
                }
            }
        }
    }

    /// Builds the table `${NAME}` templates expand from.
    ///
    /// Free variables come first; the named settings overwrite them so a
    /// `GO=...` override always reaches `${GO}`.
    #[must_use]
    pub fn template_vars(&self) -> Vars {
        let mut table: Vars = self.vars.clone();
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();

        let named: BTreeMap<&str, String> = BTreeMap::from([
            ("BUILD_DIR", self.paths.build.display().to_string()),
            ("BIN_DIR", self.paths.bin.display().to_string()),
            ("TARGET_OS", opt(&self.target.os)),
            ("TARGET_ARCH", opt(&self.target.arch)),
            ("AUDIT_TASKS", self.audit.tasks.join(" ")),
            ("GO", self.tools.go.clone()),
            ("GOFMT", self.tools.gofmt.clone()),
            ("LINTER", self.tools.linter.clone()),
            ("GIT", self.tools.git.clone()),
        ]);
        table.extend(named.into_iter().map(|(k, v)| (k.to_string(), v)));
        table
    }
}

/// Expands `${NAME}` references. Unknown names expand to nothing.
///
/// `$$` is a literal `$`; a `$` not followed by `{` or `$` is kept.
#[must_use]
pub fn expand(template: &str, vars: &Vars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        if let Some(after) = tail.strip_prefix('$') {
            out.push('$');
            rest = after;
        } else if let Some(body) = tail.strip_prefix('{')
            && let Some(end) = body.find('}')
        {
            let name = &body[..end];
            out.push_str(lookup(vars, name).unwrap_or_default());
            rest = &body[end + 1..];
        } else {
            out.push('$');
            rest = tail;
        }
    }

    out.push_str(rest);
    out
}

/// Exact match first; configuration keys may arrive lowercased.
fn lookup<'a>(vars: &'a Vars, name: &str) -> Option<&'a str> {
    vars.get(name)
        .or_else(|| {
            vars.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}
