// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   run, help, list, options, sources, platform
//! ```

pub mod config;
pub mod help;
pub mod list;
pub mod platform;
pub mod run;

#[cfg(test)]
mod tests;
