// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! <project root>/
//!   build/      paths.build   BUILD_DIR
//!   bin/        paths.bin     BIN_DIR, exported as GOBIN and on PATH
//! ```
//!
//! Relative paths are resolved against the project root (the working
//! directory) when exported to children.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChoreError, ConfigError, Result};

/// Output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub build: PathBuf,
    pub bin: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            build: PathBuf::from("build"),
            bin: PathBuf::from("bin"),
        }
    }
}

impl PathsConfig {
    /// Rejects empty directories, which would make `clean` target the
    /// project root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty path.
    pub fn validate(&self) -> Result<()> {
        for (key, path) in [("build", &self.build), ("bin", &self.bin)] {
            if path.as_os_str().is_empty() {
                return Err(ChoreError::from(ConfigError::InvalidValue {
                    section: "paths".to_string(),
                    key: key.to_string(),
                    message: "path must not be empty".to_string(),
                })
                .into());
            }
        }
        Ok(())
    }

    /// Build directory resolved against `root`.
    #[must_use]
    pub fn build_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.build)
    }

    /// Bin directory resolved against `root`.
    #[must_use]
    pub fn bin_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.bin)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
