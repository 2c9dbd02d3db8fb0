// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Styled console output.
//!
//! Styles come from `anstyle`; `anstream` strips them when stdout is not a
//! terminal and translates them for legacy Windows consoles.
//!
//! ```text
//! ==> fmt                 start marker
//! ✓ fmt                   success marker
//! ✗ lint: exited with 1   failure marker (stderr)
//! ```

pub mod styles;

use std::fmt::Display;
use std::io::Write;

pub use styles::{Palette, clap_styles};

/// Formats the start marker printed before a task runs.
#[must_use]
pub fn start_marker(palette: &Palette, task: &str) -> String {
    let accent = palette.accent;
    format!("{} {accent}{task}{accent:#}", palette.start_mark)
}

/// Formats the marker printed after a task succeeded.
#[must_use]
pub fn success_marker(palette: &Palette, task: &str) -> String {
    let style = palette.success;
    format!("{style}{} {task}{style:#}", palette.success_mark)
}

/// Formats the marker printed after a task failed.
#[must_use]
pub fn failure_marker(palette: &Palette, task: &str, reason: impl Display) -> String {
    let style = palette.failure;
    format!("{style}{} {task}: {reason}{style:#}", palette.failure_mark)
}

/// Console writer bound to the palette chosen for this host.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    palette: Palette,
}

impl Console {
    #[must_use]
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn start(&self, task: &str) {
        self.line(start_marker(&self.palette, task));
    }

    pub fn success(&self, task: &str) {
        self.line(success_marker(&self.palette, task));
    }

    pub fn failure(&self, task: &str, reason: impl Display) {
        let mut err = anstream::stderr().lock();
        writeln!(err, "{}", failure_marker(&self.palette, task, reason)).ok();
    }

    /// Prints a command that would have been run.
    pub fn dry_run(&self, command: &str) {
        let style = self.palette.warning;
        self.line(format!("{style}[dry-run]{style:#} {command}"));
    }

    /// Prints an error message to stderr.
    pub fn error(&self, message: impl Display) {
        let style = self.palette.failure;
        let mut err = anstream::stderr().lock();
        writeln!(err, "{style}Error: {message}{style:#}").ok();
    }

    /// Writes a pre-rendered block in a single call.
    pub fn block(&self, text: &str) {
        let mut out = anstream::stdout().lock();
        out.write_all(text.as_bytes()).ok();
        out.flush().ok();
    }

    pub fn line(&self, text: impl Display) {
        let mut out = anstream::stdout().lock();
        writeln!(out, "{text}").ok();
    }
}
