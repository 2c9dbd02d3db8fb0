// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() --> run_child
//!              |
//!              v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE or interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr }
//! ```

use crate::error::{ChoreError, ProcessError, Result};
use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StdinMode, StreamFlags};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the command as shown in logs and errors.
    ///
    /// Shell commands show the command string itself, not the shell argv.
    pub(crate) fn command_line(&self) -> String {
        if let Some(display) = self.display_override() {
            return display.to_string();
        }
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::SpawnFailed`] if the child cannot be started,
    /// and [`ProcessError::NonZeroExit`] if it exits with a non-zero code
    /// (unless `ALLOW_FAILURE` is set).
    pub async fn run(self) -> Result<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and the output comes
    /// back with `interrupted = true`; exit codes are not validated then.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessBuilder::run`].
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command.spawn().map_err(|source| {
            ChoreError::from(ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self
            .run_child_with_cancellation(&name, &mut child, token)
            .await?;

        if !output.is_interrupted()
            && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && !output.success()
        {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ChoreError::from(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            })
            .into());
        }

        if output.success() && !output.stderr().is_empty() {
            debug!(process = %name, stderr = %output.stderr(), "process diagnostics");
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            for (key, value) in env.iter() {
                command.env(key, value);
            }
        }

        command.stdin(match self.stdin_mode() {
            StdinMode::Null => Stdio::null(),
            StdinMode::Inherit => Stdio::inherit(),
        });
        command.stdout(Self::stdio_from_flags(self.stdout_stream()));
        command.stderr(Self::stdio_from_flags(self.stderr_stream()));
        command.kill_on_drop(true);

        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
