// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        run / help / list / platform
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              | TOML layers, NAME=value   |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              task       platform    help
//!       registry/manager  detect +   ## lines,
//!               |        capabilities renderers
//!          +----+----+
//!          v         v
//!       builtin    guard
//!      (table)  confirm/empty
//!
//!   +-----------------------------------------+
//!   |  core   process, env                    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, output    |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod guard;
pub mod help;
pub mod logging;
pub mod output;
pub mod platform;
pub mod task;
