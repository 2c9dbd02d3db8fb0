// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Invocation context.
//!
//! Built once in `main` after configuration and platform detection, then
//! passed by reference to every task. Nothing in it changes while tasks run.
//!
//! ```text
//! Config ----+--> template vars (${NAME})
//!            |
//! parent env +--> child env: PATH += <root>/bin, GOBIN, GOOS, GOARCH, [export.vars]
//!            |
//! Platform --+--> HostCapabilities, Console palette
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::config::Config;
use crate::config::types::Vars;
use crate::config::vars::expand;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::output::Console;
use crate::platform::capabilities::HostCapabilities;

/// Execution context shared by all tasks of one invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    config: Arc<Config>,
    host: HostCapabilities,
    vars: Arc<Vars>,
    /// Environment handed to every child process.
    env: Env,
    console: Console,
    cancel_token: CancellationToken,
    dry_run: bool,
    /// Project root; relative output paths resolve against it.
    root: PathBuf,
    /// Definition files scanned when help comes from `##` comments.
    help_files: Vec<PathBuf>,
}

impl InvocationContext {
    /// Creates a context over the current process environment.
    #[must_use]
    pub fn new(config: Arc<Config>, host: HostCapabilities, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let vars = Arc::new(config.template_vars());
        let env = exported_env(&config, &host, &root, current_env());
        let console = Console::new(host.palette());
        let dry_run = config.global.dry;

        Self {
            config,
            host,
            vars,
            env,
            console,
            cancel_token: CancellationToken::new(),
            dry_run,
            root,
            help_files: Vec::new(),
        }
    }

    /// Replaces the parent environment the exports are layered onto.
    #[must_use]
    pub fn with_base_env(mut self, base: Env) -> Self {
        self.env = exported_env(&self.config, &self.host, &self.root, base);
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    #[must_use]
    pub fn with_help_files(mut self, files: Vec<PathBuf>) -> Self {
        self.help_files = files;
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn host(&self) -> &HostCapabilities {
        &self.host
    }

    #[must_use]
    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn help_files(&self) -> &[PathBuf] {
        &self.help_files
    }

    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.config.paths.build_dir(&self.root)
    }

    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.config.paths.bin_dir(&self.root)
    }

    /// Expands `${NAME}` references against the resolved variables.
    #[must_use]
    pub fn expand(&self, template: &str) -> String {
        let expanded = expand(template, &self.vars);
        trace!(template, expanded = %expanded, "expanded command");
        expanded
    }
}

/// Layers the exported variables over `base`.
fn exported_env(config: &Config, host: &HostCapabilities, root: &Path, mut base: Env) -> Env {
    let bin = config.paths.bin_dir(root);
    let bin_native = host.native_path(&bin);

    base.prepend_path(&bin_native, host.list_separator());

    let export = &config.export;
    if !export.install_var.is_empty() {
        base.set(export.install_var.as_str(), bin_native.as_str());
    }
    if let Some(os) = &config.target.os
        && !export.os_var.is_empty()
    {
        base.set(export.os_var.as_str(), os.as_str());
    }
    if let Some(arch) = &config.target.arch
        && !export.arch_var.is_empty()
    {
        base.set(export.arch_var.as_str(), arch.as_str());
    }
    for (name, value) in &export.vars {
        base.set(name.as_str(), value.as_str());
    }

    base
}
