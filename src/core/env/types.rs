// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable management.
//!
//! ```text
//! EnvFlags: Replace | Append | Prepend
//! EnvKey: case-insensitive when built for Windows (PATH == Path == path)
//! EnvData: BTreeMap<EnvKey, String> for deterministic order
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How a new value combines with an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvFlags {
    #[default]
    Replace,
    Append,
    Prepend,
}

/// Environment variable key. Compares case-insensitively on Windows builds,
/// where the OS treats `Path` and `PATH` as the same variable.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

const CASE_INSENSITIVE: bool = cfg!(windows);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if CASE_INSENSITIVE {
            self.0
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
        } else {
            self.0.cmp(&other.0)
        }
    }
}

/// Shared environment data for copy-on-write semantics.
#[derive(Debug, Clone, Default)]
pub(super) struct EnvData {
    vars: BTreeMap<EnvKey, String>,
}

impl EnvData {
    pub(super) const fn from_vars(vars: BTreeMap<EnvKey, String>) -> Self {
        Self { vars }
    }

    pub(super) const fn vars(&self) -> &BTreeMap<EnvKey, String> {
        &self.vars
    }

    pub(super) const fn vars_mut(&mut self) -> &mut BTreeMap<EnvKey, String> {
        &mut self.vars
    }
}
