// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform capabilities, resolved once per invocation.
//!
//! ```text
//!                   HostCapabilities
//!                 platform + &dyn HostBackend
//!                           |
//!            +--------------+--------------+
//!            v                             v
//!      PosixBackend                  WindowsBackend
//!   /bin/sh -c                   pwsh (or powershell) -Command
//!   '/' and ':'                  '\' and ';'
//!   rm -rf / mkdir -p            Remove-Item / New-Item
//!   ANSI palette                 console palette
//!   ConfirmPolicy::POSIX         ConfirmPolicy::WINDOWS
//!   ColumnRenderer               TableRenderer
//! ```

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::Platform;
use crate::core::process::builder::ProcessBuilder;
use crate::error::PlatformError;
use crate::guard::ConfirmPolicy;
use crate::help::render::{COLUMN_RENDERER, HelpRenderer, TABLE_RENDERER};
use crate::output::Palette;

/// Backend family, for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Posix,
    Windows,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Shell used to run command templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellSpec {
    pub program: String,
    pub args: Vec<String>,
}

/// Every platform-dependent decision, behind one interface.
pub trait HostBackend: fmt::Debug + Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Shell program and the arguments that precede the command string.
    ///
    /// May search PATH; [`HostCapabilities`] asks once and keeps the answer.
    fn shell(&self) -> ShellSpec;

    /// Separator between path components.
    fn path_separator(&self) -> char;

    /// Separator between entries of a search-path variable.
    fn list_separator(&self) -> char;

    fn palette(&self) -> Palette;

    /// Quotes one argument for this backend's shell.
    fn quote(&self, arg: &str) -> String;

    /// Command that removes the given directories, ignoring missing ones.
    fn remove_dirs_command(&self, dirs: &[&Path]) -> String;

    /// Command that creates the given directories and their parents.
    fn make_dirs_command(&self, dirs: &[&Path]) -> String;

    fn confirm_policy(&self) -> ConfirmPolicy;

    fn help_renderer(&self) -> &'static dyn HelpRenderer;
}

/// Unix-like hosts and Unix emulation layers on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixBackend;

/// Native Windows hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsBackend;

static POSIX: PosixBackend = PosixBackend;
static WINDOWS: WindowsBackend = WindowsBackend;

fn is_shell_safe(arg: &str) -> bool {
    !arg.is_empty()
        && arg.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+' | ',' | '@')
        })
}

impl HostBackend for PosixBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Posix
    }

    fn shell(&self) -> ShellSpec {
        ShellSpec {
            program: "/bin/sh".to_string(),
            args: vec!["-c".to_string()],
        }
    }

    fn path_separator(&self) -> char {
        '/'
    }

    fn list_separator(&self) -> char {
        ':'
    }

    fn palette(&self) -> Palette {
        Palette::ANSI
    }

    fn quote(&self, arg: &str) -> String {
        if is_shell_safe(arg) {
            arg.to_string()
        } else {
            format!("'{}'", arg.replace('\'', r"'\''"))
        }
    }

    fn remove_dirs_command(&self, dirs: &[&Path]) -> String {
        let targets: Vec<String> = dirs
            .iter()
            .map(|d| self.quote(&d.to_string_lossy()))
            .collect();
        format!("rm -rf -- {}", targets.join(" "))
    }

    fn make_dirs_command(&self, dirs: &[&Path]) -> String {
        let targets: Vec<String> = dirs
            .iter()
            .map(|d| self.quote(&d.to_string_lossy()))
            .collect();
        format!("mkdir -p -- {}", targets.join(" "))
    }

    fn confirm_policy(&self) -> ConfirmPolicy {
        ConfirmPolicy::POSIX
    }

    fn help_renderer(&self) -> &'static dyn HelpRenderer {
        &COLUMN_RENDERER
    }
}

impl HostBackend for WindowsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Windows
    }

    fn shell(&self) -> ShellSpec {
        let program = if ProcessBuilder::exists("pwsh") {
            "pwsh"
        } else {
            "powershell"
        };
        ShellSpec {
            program: program.to_string(),
            args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
            ],
        }
    }

    fn path_separator(&self) -> char {
        '\\'
    }

    fn list_separator(&self) -> char {
        ';'
    }

    fn palette(&self) -> Palette {
        Palette::CONSOLE
    }

    fn quote(&self, arg: &str) -> String {
        if is_shell_safe(arg) && !arg.contains(',') {
            arg.to_string()
        } else {
            format!("'{}'", arg.replace('\'', "''"))
        }
    }

    fn remove_dirs_command(&self, dirs: &[&Path]) -> String {
        let targets: Vec<String> = dirs
            .iter()
            .map(|d| format!("'{}'", d.to_string_lossy().replace('\'', "''")))
            .collect();
        format!(
            "Remove-Item -Recurse -Force -ErrorAction SilentlyContinue -LiteralPath {}",
            targets.join(",")
        )
    }

    fn make_dirs_command(&self, dirs: &[&Path]) -> String {
        let targets: Vec<String> = dirs
            .iter()
            .map(|d| format!("'{}'", d.to_string_lossy().replace('\'', "''")))
            .collect();
        format!(
            "New-Item -ItemType Directory -Force -Path {} | Out-Null",
            targets.join(",")
        )
    }

    fn confirm_policy(&self) -> ConfirmPolicy {
        ConfirmPolicy::WINDOWS
    }

    fn help_renderer(&self) -> &'static dyn HelpRenderer {
        &TABLE_RENDERER
    }
}

/// The platform strategy threaded through every operation.
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    platform: Platform,
    backend: &'static dyn HostBackend,
    /// The backend's shell, looked up when the host is resolved.
    shell: ShellSpec,
    shell_override: Option<String>,
}

impl HostCapabilities {
    /// Picks the backend for a detected platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unrecognized`] for [`Platform::Unknown`] and
    /// for override names that are not a known platform.
    pub fn resolve(platform: Platform) -> Result<Self, PlatformError> {
        let backend: &'static dyn HostBackend = match platform {
            Platform::Windows => &WINDOWS,
            Platform::Linux
            | Platform::Darwin
            | Platform::FreeBsd
            | Platform::OpenBsd
            | Platform::NetBsd
            | Platform::Msys
            | Platform::Cygwin => &POSIX,
            Platform::Other(_) | Platform::Unknown => {
                return Err(PlatformError::Unrecognized {
                    name: platform.name().to_string(),
                });
            }
        };

        Ok(Self::with_backend(platform, backend))
    }

    /// Binds a platform to a backend and settles its shell program.
    #[must_use]
    pub(crate) fn with_backend(platform: Platform, backend: &'static dyn HostBackend) -> Self {
        Self {
            platform,
            backend,
            shell: backend.shell(),
            shell_override: None,
        }
    }

    /// Replaces the shell program, keeping the backend's shell arguments.
    #[must_use]
    pub fn with_shell(mut self, program: Option<String>) -> Self {
        self.shell_override = program.filter(|p| !p.trim().is_empty());
        self
    }

    #[must_use]
    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    #[must_use]
    pub fn backend(&self) -> &'static dyn HostBackend {
        self.backend
    }

    #[must_use]
    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    #[must_use]
    pub fn shell(&self) -> ShellSpec {
        let mut spec = self.shell.clone();
        if let Some(program) = &self.shell_override {
            spec.program.clone_from(program);
        }
        spec
    }

    #[must_use]
    pub fn list_separator(&self) -> char {
        self.backend.list_separator()
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.backend.palette()
    }

    #[must_use]
    pub fn confirm_policy(&self) -> ConfirmPolicy {
        self.backend.confirm_policy()
    }

    #[must_use]
    pub fn help_renderer(&self) -> &'static dyn HelpRenderer {
        self.backend.help_renderer()
    }

    /// Renders a path with this host's separator.
    #[must_use]
    pub fn native_path(&self, path: &Path) -> String {
        let text = path.to_string_lossy();
        match self.backend.path_separator() {
            '\\' => text.replace('/', "\\"),
            _ => text.into_owned(),
        }
    }

    #[must_use]
    pub fn remove_dirs_command(&self, dirs: &[&Path]) -> String {
        self.backend.remove_dirs_command(dirs)
    }

    #[must_use]
    pub fn make_dirs_command(&self, dirs: &[&Path]) -> String {
        self.backend.make_dirs_command(dirs)
    }
}
