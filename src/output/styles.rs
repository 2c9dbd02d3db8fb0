// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Colour palettes and clap help styling.

use anstyle::{AnsiColor, Color, Effects, Style};

/// Styles and marker glyphs used for console output.
///
/// Selected once per invocation by the host backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Task names in help rows and start markers.
    pub accent: Style,
    pub success: Style,
    pub failure: Style,
    pub warning: Style,
    /// Section headers.
    pub header: Style,
    pub success_mark: &'static str,
    pub failure_mark: &'static str,
    pub start_mark: &'static str,
}

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

impl Palette {
    /// ANSI 8-colour escapes, as a POSIX terminal renders them.
    pub const ANSI: Self = Self {
        accent: fg(AnsiColor::Cyan),
        success: fg(AnsiColor::Green),
        failure: fg(AnsiColor::Red),
        warning: fg(AnsiColor::Yellow),
        header: Style::new().effects(Effects::BOLD),
        success_mark: "✓",
        failure_mark: "✗",
        start_mark: "==>",
    };

    /// Bright console colours with ASCII markers, matching the Windows
    /// console's `Cyan`/`Green`/`Red` foreground names.
    pub const CONSOLE: Self = Self {
        accent: fg(AnsiColor::BrightCyan),
        success: fg(AnsiColor::BrightGreen),
        failure: fg(AnsiColor::BrightRed),
        warning: fg(AnsiColor::BrightYellow),
        header: Style::new().effects(Effects::BOLD),
        success_mark: "[OK]",
        failure_mark: "[FAILED]",
        start_mark: "==>",
    };

    /// No styling at all; used in tests and when output is captured.
    pub const PLAIN: Self = Self {
        accent: Style::new(),
        success: Style::new(),
        failure: Style::new(),
        warning: Style::new(),
        header: Style::new(),
        success_mark: "✓",
        failure_mark: "✗",
        start_mark: "==>",
    };

    /// Same glyphs, styles stripped.
    #[must_use]
    pub const fn without_styles(self) -> Self {
        Self {
            accent: Style::new(),
            success: Style::new(),
            failure: Style::new(),
            warning: Style::new(),
            header: Style::new(),
            ..self
        }
    }
}

/// Custom clap styles for `--help` output.
#[must_use]
pub fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(fg(AnsiColor::Green).effects(Effects::BOLD))
        .usage(fg(AnsiColor::Green).effects(Effects::BOLD))
        .literal(fg(AnsiColor::Cyan))
        .placeholder(fg(AnsiColor::Cyan))
        .error(fg(AnsiColor::Red).effects(Effects::BOLD))
        .valid(fg(AnsiColor::Green))
        .invalid(fg(AnsiColor::Yellow))
}
