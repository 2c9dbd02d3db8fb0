// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              ChoreError (16 bytes)
//!                     |
//!   +--------+------+-+----+------+------+
//!   |        |      |      |      |      |
//!   v        v      v      v      v      v
//! Platform  Cfg    Task   Proc   Guard   Io
//!   Box     Box    Box    Box    Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Platform  Unrecognized
//!   Config    ParseError, MissingKey, InvalidValue, InvalidOverride
//!   Task      NotFound, Cycle, Interrupted
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Guard     Declined, NotEmpty
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ChoreError`].
pub type ChoreResult<T> = std::result::Result<T, ChoreError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum ChoreError {
    /// Host platform could not be used.
    #[error("platform error: {0}")]
    Platform(#[from] Box<PlatformError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Task execution error.
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// A fail-fast guard rejected the invocation.
    #[error("{0}")]
    Guard(#[from] Box<GuardError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ChoreError {
                fn from(err: $error) -> Self {
                    ChoreError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    PlatformError => Platform,
    ConfigError => Config,
    TaskError => Task,
    ProcessError => Process,
    GuardError => Guard,
    std::io::Error => Io,
}

// --- Platform Errors ---

/// Host platform errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// No detection step produced a recognized platform name.
    #[error("host platform not recognized ({name}); set PLATFORM=<name> to override")]
    Unrecognized { name: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `NAME=value` or `--set key=value` argument could not be parsed.
    #[error("invalid override '{0}', expected NAME=value")]
    InvalidOverride(String),
}

// --- Task Errors ---

/// Task execution errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task was not found.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// Aggregate membership loops back onto itself.
    #[error("task '{task}' depends on itself via {chain}")]
    Cycle { task: String, chain: String },

    /// Task was interrupted.
    #[error("task '{0}' was interrupted")]
    Interrupted(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Guard Errors ---

/// Fail-fast guard rejections.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The confirmation prompt was answered with anything but the affirmative.
    #[error("{message}")]
    Declined { message: String },

    /// A check command that must print nothing printed something.
    #[error("{message}")]
    NotEmpty { message: String, output: String },
}
