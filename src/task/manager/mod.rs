// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task manager for orchestrating task execution.
//!
//! ```text
//! TaskManager::new(registry, ctx)
//!   .add("fmt") .add("audit")
//!   .run_all().await
//!       per task: ==> name, action, ✓ name | ✗ name
//!       aggregate: members in order, first failure stops the rest
//!       each task runs at most once; a task reaching itself is a cycle
//! ```
//!
//! Tasks never run concurrently; one child process exists at a time.

use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::config::types::HelpSource;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ChoreError, ConfigError, ProcessError, Result, TaskError};
use crate::guard::{confirm, ensure_empty};
use crate::help::{entries_from_registry, extract_from_files, print_help};

use super::registry::TaskRegistry;
use super::{InvocationContext, TaskAction, TaskSpec};

/// Bookkeeping for one `run_all` call.
#[derive(Debug, Default)]
struct RunState {
    completed: Vec<String>,
    /// Tasks currently running, outermost first.
    stack: Vec<String>,
}

/// Manager for orchestrating task execution.
///
/// Tasks are executed sequentially in the order they were added.
pub struct TaskManager {
    registry: Arc<TaskRegistry>,
    ctx: InvocationContext,
    /// Task names to execute.
    tasks: Vec<String>,
    /// Where confirmation answers are read from.
    input: Arc<Mutex<Box<dyn BufRead + Send>>>,
}

impl TaskManager {
    /// Creates a manager reading confirmation answers from stdin.
    #[must_use]
    pub fn new(registry: Arc<TaskRegistry>, ctx: InvocationContext) -> Self {
        Self {
            registry,
            ctx,
            tasks: Vec::new(),
            input: Arc::new(Mutex::new(Box::new(BufReader::new(std::io::stdin())))),
        }
    }

    /// Reads confirmation answers from `input` instead of stdin.
    #[must_use]
    pub fn with_input(mut self, input: impl BufRead + Send + 'static) -> Self {
        self.input = Arc::new(Mutex::new(Box::new(input)));
        self
    }

    /// Adds a task to be executed.
    pub fn add(&mut self, name: impl Into<String>) {
        self.tasks.push(name.into());
    }

    pub fn add_all(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        self.tasks.extend(names.into_iter().map(Into::into));
    }

    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub const fn context(&self) -> &InvocationContext {
        &self.ctx
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.ctx.is_cancelled()
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.ctx.cancel_token().clone()
    }

    /// Triggers cancellation; the running child is killed.
    pub fn interrupt_all(&self) {
        info!("interrupting tasks");
        self.ctx.cancel_token().cancel();
    }

    /// Runs all tasks sequentially.
    ///
    /// # Errors
    ///
    /// Returns the first task failure; the remaining tasks do not run.
    pub async fn run_all(&self) -> Result<()> {
        if self.tasks.is_empty() {
            debug!("no tasks to run");
            return Ok(());
        }

        info!(task_count = self.tasks.len(), "starting task execution");

        let mut state = RunState::default();
        for name in &self.tasks {
            self.run_task(name, &mut state).await?;
        }

        info!("all tasks completed successfully");
        Ok(())
    }

    fn run_task<'a>(
        &'a self,
        name: &'a str,
        state: &'a mut RunState,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if self.is_cancelled() {
                return Err(interrupted(name));
            }

            if state.stack.iter().any(|running| running == name) {
                let chain = state
                    .stack
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(name))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ChoreError::from(TaskError::Cycle {
                    task: name.to_string(),
                    chain,
                })
                .into());
            }

            if state.completed.iter().any(|done| done == name) {
                trace!(task = %name, "already ran");
                return Ok(());
            }

            let spec = self
                .registry
                .get(name)
                .ok_or_else(|| ChoreError::from(TaskError::NotFound(name.to_string())))?;

            if !spec.enabled {
                debug!(task = %name, "skipping disabled task");
                state.completed.push(name.to_string());
                return Ok(());
            }

            debug!(task = %name, action = spec.action.kind(), "running task");
            if spec.log {
                self.ctx.console().start(name);
            }

            state.stack.push(name.to_string());
            let result = self.execute(spec, state).await;
            state.stack.pop();

            match &result {
                Ok(()) => {
                    if spec.log {
                        self.ctx.console().success(name);
                    }
                    state.completed.push(name.to_string());
                }
                Err(err) => {
                    debug!(task = %name, error = %err, "task failed");
                    if spec.log {
                        self.ctx.console().failure(name, failure_reason(err));
                    }
                }
            }
            result
        })
    }

    async fn execute(&self, spec: &TaskSpec, state: &mut RunState) -> Result<()> {
        match &spec.action {
            TaskAction::Shell { commands } => {
                for template in commands {
                    let command = self.ctx.expand(template);
                    self.run_shell(&spec.name, &command).await?;
                }
                Ok(())
            }
            TaskAction::Aggregate { members } => {
                for member in self.registry.resolve(members)? {
                    self.run_task(&member, state).await?;
                }
                Ok(())
            }
            TaskAction::Help => self.help(),
            TaskAction::Confirm { message } => self.confirm(&spec.name, message).await,
            TaskAction::RequireEmpty { check, message } => {
                ensure_empty(&self.ctx, check, message).await
            }
            TaskAction::Clean => {
                let dirs = self.output_dirs()?;
                let command = self.ctx.host().remove_dirs_command(&dirs);
                self.run_shell(&spec.name, &command).await
            }
            TaskAction::MakeDirs => {
                let dirs = self.output_dirs()?;
                let command = self.ctx.host().make_dirs_command(&dirs);
                self.run_shell(&spec.name, &command).await
            }
        }
    }

    async fn run_shell(&self, task: &str, command: &str) -> Result<()> {
        if self.ctx.is_dry_run() {
            info!(task, command, "dry run");
            self.ctx.console().dry_run(command);
            return Ok(());
        }

        let output = ProcessBuilder::shell(self.ctx.host(), command)
            .env(self.ctx.env().clone())
            .cwd(self.ctx.root())
            .name(task)
            .inherit_stdio()
            .inherit_stdin()
            .run_with_cancellation(self.ctx.cancel_token().clone())
            .await?;

        if output.is_interrupted() {
            return Err(interrupted(task));
        }
        Ok(())
    }

    fn help(&self) -> Result<()> {
        let entries = match self.ctx.config().help.source {
            HelpSource::Registry => entries_from_registry(&self.registry),
            HelpSource::Comments => extract_from_files(self.ctx.help_files())?,
        };
        print_help(self.ctx.host(), self.ctx.console(), &entries);
        Ok(())
    }

    /// Asks for confirmation without blocking the runtime.
    ///
    /// The answer is read on a detached thread so that cancellation returns
    /// at once; a read still pending on interrupt ends with the process.
    async fn confirm(&self, task: &str, message: &str) -> Result<()> {
        let policy = self.ctx.host().confirm_policy();

        if self.ctx.is_dry_run() {
            self.ctx.console().dry_run(policy.prompt().trim_end());
            return Ok(());
        }

        let input = Arc::clone(&self.input);
        let message = message.to_string();
        let (tx, rx) = oneshot::channel();
        std::thread::Builder::new()
            .name("confirm".to_string())
            .spawn(move || {
                let mut input = input.lock().unwrap_or_else(PoisonError::into_inner);
                let mut output = anstream::stdout();
                let _ = tx.send(confirm(&policy, &mut *input, &mut output, &message));
            })
            .context("failed to start the confirmation reader")?;

        tokio::select! {
            answer = rx => answer.context("confirmation reader stopped without an answer")?,
            () = self.ctx.cancel_token().cancelled() => {
                debug!(task, "confirmation interrupted");
                Err(interrupted(task))
            }
        }
    }

    /// The configured output directories, as written in the configuration.
    ///
    /// Refuses directories that resolve to the project root or above it,
    /// including spellings such as `..` or `sub/../..`.
    fn output_dirs(&self) -> Result<Vec<&Path>> {
        let paths = &self.ctx.config().paths;
        let root = normalize_lexically(self.ctx.root());
        let mut dirs: Vec<&Path> = Vec::with_capacity(2);

        for (key, dir) in [
            ("build", paths.build.as_path()),
            ("bin", paths.bin.as_path()),
        ] {
            let resolved = normalize_lexically(&self.ctx.root().join(dir));
            if root.starts_with(&resolved) {
                return Err(ChoreError::from(ConfigError::InvalidValue {
                    section: "paths".to_string(),
                    key: key.to_string(),
                    message: format!("'{}' contains the project root", dir.display()),
                })
                .into());
            }
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        Ok(dirs)
    }
}

fn interrupted(task: &str) -> anyhow::Error {
    ChoreError::from(TaskError::Interrupted(task.to_string())).into()
}

/// Folds `.` and `..` components without touching the filesystem.
///
/// `..` at the top of an absolute path stays at the top.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Short reason shown in the failure marker.
fn failure_reason(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ChoreError>() {
        Some(ChoreError::Process(inner)) => match inner.as_ref() {
            ProcessError::NonZeroExit { code, .. } => format!("exited with code {code}"),
            other => other.to_string(),
        },
        Some(ChoreError::Task(inner)) => inner.to_string(),
        Some(ChoreError::Guard(inner)) => inner.to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests;
