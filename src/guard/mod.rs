// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fail-fast guards.
//!
//! ```text
//! confirm        "Are you sure? [y/N] " --> response
//!                empty --> default "N" --> Declined(message)
//!                "y"   --> Ok
//!
//! ensure_empty   shell(check) --> stdout
//!                ""   --> Ok
//!                else --> NotEmpty(message)
//! ```
//!
//! The two host families read the answer differently. POSIX shells use
//! `read -r`, which strips surrounding whitespace and compares exactly.
//! `Read-Host` on Windows keeps the raw line and PowerShell compares
//! case-insensitively. Each policy keeps its own behavior.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::core::process::builder::ProcessBuilder;
use crate::error::{ChoreError, GuardError, Result};
use crate::task::InvocationContext;

/// How a confirmation answer is read and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    /// The only answer that confirms.
    pub affirmative: &'static str,
    /// Answer assumed for an empty response.
    pub default_answer: &'static str,
    pub case_sensitive: bool,
    /// Strip surrounding whitespace before comparing.
    pub trim: bool,
}

impl ConfirmPolicy {
    /// `read -r -p "..." ans && [ "${ans:-N}" = y ]`
    pub const POSIX: Self = Self {
        affirmative: "y",
        default_answer: "N",
        case_sensitive: true,
        trim: true,
    };

    /// `$ans = Read-Host ...; if (-not $ans) { $ans = 'N' }; if ($ans -ne 'y') { ... }`
    pub const WINDOWS: Self = Self {
        affirmative: "y",
        default_answer: "N",
        case_sensitive: false,
        trim: false,
    };

    /// The prompt shown to the user.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure? [{}/{}] ",
            self.affirmative, self.default_answer
        )
    }

    /// Applies trimming and the default to a raw response line.
    #[must_use]
    pub fn resolve<'a>(&self, response: &'a str) -> &'a str {
        let response = response.trim_end_matches(['\r', '\n']);
        let response = if self.trim { response.trim() } else { response };
        if response.is_empty() {
            self.default_answer
        } else {
            response
        }
    }

    /// Returns true if the raw response confirms.
    #[must_use]
    pub fn accepts(&self, response: &str) -> bool {
        let answer = self.resolve(response);
        if self.case_sensitive {
            answer == self.affirmative
        } else {
            answer.eq_ignore_ascii_case(self.affirmative)
        }
    }
}

/// Prompts on `output`, reads one line from `input`, and fails with
/// `message` unless the answer confirms.
///
/// End of input counts as an empty response.
///
/// # Errors
///
/// Returns [`GuardError::Declined`] on any answer but the affirmative, and
/// an I/O error if the prompt cannot be written or the answer read.
pub fn confirm<R, W>(
    policy: &ConfirmPolicy,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    output.write_all(policy.prompt().as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    if policy.accepts(&line) {
        debug!("confirmation accepted");
        Ok(())
    } else {
        debug!(answer = %policy.resolve(&line), "confirmation declined");
        Err(ChoreError::from(GuardError::Declined {
            message: message.to_string(),
        })
        .into())
    }
}

/// Runs `check` through the host shell and fails with `message` if it
/// prints anything.
///
/// The check runs in the project root. In dry-run mode the check is only announced.
///
/// # Errors
///
/// Returns [`GuardError::NotEmpty`] when the check produced output, or the
/// process error if the check command itself failed.
pub async fn ensure_empty(ctx: &InvocationContext, check: &str, message: &str) -> Result<()> {
    let command = ctx.expand(check);

    if ctx.is_dry_run() {
        ctx.console().dry_run(&command);
        return Ok(());
    }

    let output = ProcessBuilder::shell(ctx.host(), &command)
        .env(ctx.env().clone())
        .cwd(ctx.root())
        .name("check")
        .capture_stdout()
        .run_with_cancellation(ctx.cancel_token().clone())
        .await?;

    if output.is_interrupted() {
        anyhow::bail!("check '{command}' was interrupted");
    }

    let printed = output.stdout().trim();
    if printed.is_empty() {
        Ok(())
    } else {
        debug!(check = %command, output = %printed, "guard check produced output");
        Err(ChoreError::from(GuardError::NotEmpty {
            message: message.to_string(),
            output: printed.to_string(),
        })
        .into())
    }
}
