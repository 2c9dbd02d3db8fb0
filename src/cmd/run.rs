// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::platform::capabilities::HostCapabilities;
use crate::task::InvocationContext;
use crate::task::manager::TaskManager;
use crate::task::registry::TaskRegistry;

/// Main handler for run command.
///
/// `NAME=value` items are expected to be applied to `config` already.
///
/// # Errors
///
/// Returns an error if the task table is invalid, a pattern matches nothing,
/// or a task fails.
pub async fn run_tasks(
    args: &RunArgs,
    config: Config,
    host: HostCapabilities,
    help_files: Vec<PathBuf>,
) -> Result<()> {
    let root = std::env::current_dir().context("failed to determine the project root")?;
    let registry = Arc::new(TaskRegistry::from_config(&config)?);
    let names = registry.resolve(&args.tasks())?;

    let ctx = InvocationContext::new(Arc::new(config), host, root).with_help_files(help_files);
    let mut manager = TaskManager::new(Arc::clone(&registry), ctx);
    manager.add_all(names);

    let cancel_token = manager.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting tasks...");
            cancel_token.cancel();
        }
    });

    manager.run_all().await?;
    tracing::debug!("run completed");
    Ok(())
}
