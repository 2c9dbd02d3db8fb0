// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! ```text
//! Env (copy-on-write BTreeMap<String, String>)
//! Sources: current_env(), Env::from_map(), Env::new()
//! Ops: set/get/remove/prepend_path
//! ```
//!
//! Children spawned by tasks get an explicit `Env` built once per
//! invocation; the process environment is never mutated.

pub mod container;
pub mod types;

#[cfg(test)]
mod tests;

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    let vars = std::env::vars().collect();
    container::Env::from_map(vars)
}
