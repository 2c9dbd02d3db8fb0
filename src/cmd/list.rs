// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation.

use anyhow::Context;

use crate::cli::run::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::task::TaskSpec;
use crate::task::registry::TaskRegistry;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the task table is invalid or a pattern matches nothing.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    for line in list_lines(args, config)? {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed by `list`.
///
/// # Errors
///
/// Returns an error if the task table is invalid or a pattern matches nothing.
pub fn list_lines(args: &ListArgs, config: &Config) -> Result<Vec<String>> {
    let registry = TaskRegistry::from_config(config)?;

    if args.aliases {
        return alias_lines(&registry, args.json);
    }

    let specs: Vec<&TaskSpec> = if args.patterns.is_empty() {
        registry.tasks().iter().collect()
    } else {
        registry
            .resolve(&args.patterns)?
            .iter()
            .filter_map(|name| registry.get(name))
            .collect()
    };

    if args.json {
        let json = serde_json::to_string_pretty(&specs).context("failed to serialize tasks")?;
        return Ok(vec![json]);
    }

    if specs.is_empty() {
        return Ok(vec!["No tasks found".to_string()]);
    }

    Ok(specs
        .iter()
        .map(|spec| {
            if spec.enabled {
                spec.name.clone()
            } else {
                format!("{} (disabled)", spec.name)
            }
        })
        .collect())
}

fn alias_lines(registry: &TaskRegistry, json: bool) -> Result<Vec<String>> {
    let aliases = registry.aliases();

    if json {
        let json = serde_json::to_string_pretty(aliases).context("failed to serialize aliases")?;
        return Ok(vec![json]);
    }

    if aliases.is_empty() {
        return Ok(vec!["No aliases defined".to_string()]);
    }

    Ok(aliases
        .iter()
        .map(|(name, targets)| format!("{name} = {}", targets.join(", ")))
        .collect())
}
