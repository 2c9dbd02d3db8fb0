// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("chore.toml")
//!   .add_toml_file(--config)
//!   .add_toml_str()
//!   .with_env_prefix("CHORE")
//!   .set(--set)
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::{ChoreError, ConfigError, Result};

/// Kind of source a loaded file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Optional,
    String,
}

impl SourceKind {
    const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Optional => "optional",
            Self::String => "string",
        }
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(SourceKind, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push((SourceKind::File, p.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push((SourceKind::Optional, p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push((SourceKind::String, PathBuf::from("<string>")));
        self
    }

    /// Reads `PREFIX_SECTION_KEY` variables, e.g. `CHORE_PATHS_BIN`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ChoreError::from(ConfigError::InvalidOverride(format!("{key}: {e}"))))?;
        Ok(self)
    }

    /// Applies a `section.key=value` (or `section/key=value`) override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if there is no `=` or no key.
    pub fn set_option(self, option: &str) -> Result<Self> {
        let (key, value) = option
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| ChoreError::from(ConfigError::InvalidOverride(option.to_string())))?;
        let key = key.trim().replace('/', ".");
        self.set(&key, value)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, or the merged result does not match [`Config`].
    pub fn build(self) -> Result<Config> {
        let Self {
            builder,
            env_prefix,
            files,
        } = self;
        let builder = match env_prefix {
            Some(prefix) => builder.add_source(
                Environment::with_prefix(&prefix)
                    .separator("_")
                    .try_parsing(true),
            ),
            None => builder,
        };
        let parse_error = |err: config::ConfigError| -> ChoreError {
            let path = files
                .last()
                .map_or_else(|| "<defaults>".to_string(), |(_, p)| p.display().to_string());
            ConfigError::ParseError {
                path,
                message: err.to_string(),
            }
            .into()
        };
        let cfg = builder.build().map_err(parse_error)?;
        let mut config: Config = cfg.try_deserialize().map_err(parse_error)?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Files that contributed to the configuration, in load order.
    #[must_use]
    pub fn loaded_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|(kind, _)| *kind != SourceKind::String)
            .map(|(_, path)| path.clone())
            .collect()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (kind, path))| format!("{}. [{}] {}", i + 1, kind.label(), path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
