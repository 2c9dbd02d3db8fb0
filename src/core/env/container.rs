// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable struct with copy-on-write sharing.
//!
//! ```text
//! Env { data: Arc<EnvData> }
//! clone shares the Arc; the first write copies (Arc::make_mut)
//! ```

use super::types::{EnvData, EnvFlags, EnvKey};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Cloning is cheap; the map is copied on the first modification of a
/// shared instance.
#[derive(Debug, Clone, Default)]
pub struct Env {
    data: Arc<EnvData>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        let data = EnvData::from_vars(vars.into_iter().map(|(k, v)| (EnvKey::new(k), v)).collect());
        Self {
            data: Arc::new(data),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set_with_flags(key, value, EnvFlags::Replace)
    }

    /// Sets a variable, combining with an existing value according to `flags`.
    ///
    /// Append and prepend concatenate without a separator; use
    /// [`Env::prepend_path`] for search-path variables.
    pub fn set_with_flags(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        flags: EnvFlags,
    ) -> &mut Self {
        let key = EnvKey::new(key.into());
        let value = value.into();
        let vars = Arc::make_mut(&mut self.data).vars_mut();

        match (flags, vars.get_mut(&key)) {
            (EnvFlags::Append, Some(existing)) => existing.push_str(&value),
            (EnvFlags::Prepend, Some(existing)) => existing.insert_str(0, &value),
            _ => {
                vars.insert(key, value);
            }
        }

        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.vars().get(&EnvKey::new(key)).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        Arc::make_mut(&mut self.data)
            .vars_mut()
            .remove(&EnvKey::new(key));
        self
    }

    /// Prepends a directory to `PATH` using the host's list separator.
    pub fn prepend_path(&mut self, path: impl AsRef<Path>, separator: char) -> &mut Self {
        let entry = path.as_ref().to_string_lossy().into_owned();
        let joined = match self.get("PATH").filter(|current| !current.is_empty()) {
            Some(current) => format!("{entry}{separator}{current}"),
            None => entry,
        };
        self.set("PATH", joined)
    }

    /// Returns all environment variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.vars().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.vars().len()
    }
}
