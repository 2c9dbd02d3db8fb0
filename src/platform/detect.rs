// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host platform detection.
//!
//! ```text
//! override? --yes--> Platform (verbatim)
//!     | no
//!     v
//! OS == Windows_NT? --yes--> PATH contains ';'? --yes--> Windows
//!     | no                        | no (emulation layer)
//!     v                           v
//! uname -s  <---------------------+
//!     |
//!     v
//! normalize: MSYS_NT-*, MINGW64_NT-*, ... --> MSYS
//!            CYGWIN_NT-*                  --> Cygwin
//!            Linux, Darwin, *BSD          --> as is
//!            anything else                --> Unknown
//! ```

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::Platform;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::Result;

/// Environment variable that is normally only present on Windows.
pub const WINDOWS_SIGNAL_VAR: &str = "OS";

/// Value of [`WINDOWS_SIGNAL_VAR`] on the Windows family.
pub const WINDOWS_SIGNAL_VALUE: &str = "Windows_NT";

/// List separator Windows uses in its native search path.
pub const NATIVE_WINDOWS_LIST_SEPARATOR: char = ';';

/// Command used to identify the system when the environment is inconclusive.
pub const SYSTEM_NAME_COMMAND: &str = "uname";

/// Verbose `uname -s` spellings that collapse to one emulation layer.
static EMULATION_LAYERS: LazyLock<Vec<(Regex, Platform)>> = LazyLock::new(|| {
    [
        (
            r"^(?:MSYS|MINGW32|MINGW64|UCRT64|CLANG32|CLANG64|CLANGARM64)_NT",
            Platform::Msys,
        ),
        (r"^CYGWIN_NT", Platform::Cygwin),
    ]
    .into_iter()
    .filter_map(|(pattern, platform)| Regex::new(pattern).ok().map(|re| (re, platform)))
    .collect()
});

/// Source of host information, abstracted so detection can be tested.
pub trait HostProbe {
    /// Looks up an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Runs the system identification command and returns its trimmed output.
    ///
    /// `Ok(None)` means the command is unavailable or failed.
    fn system_name(&self) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Probe backed by the real process environment and `uname`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    async fn system_name(&self) -> Result<Option<String>> {
        let Ok(builder) = ProcessBuilder::which(SYSTEM_NAME_COMMAND) else {
            debug!(
                command = SYSTEM_NAME_COMMAND,
                "system identification command not found"
            );
            return Ok(None);
        };

        let output = builder
            .arg("-s")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run()
            .await?;

        if !output.success() {
            debug!(exit_code = output.exit_code(), "uname -s failed");
            return Ok(None);
        }

        let name = output.stdout().trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }
}

/// Which detection step produced the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "raw")]
pub enum DetectionSource {
    /// An explicit override was supplied by the caller.
    Override,
    /// The environment signal identified native Windows.
    Environment,
    /// The system identification command reported this raw name.
    SystemCommand(String),
    /// No step produced a recognized name.
    Undetected,
}

/// Result of platform detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub platform: Platform,
    pub source: DetectionSource,
}

/// Detects the host platform with ordered precedence.
#[derive(Debug, Clone, Default)]
pub struct PlatformDetector {
    platform_override: Option<String>,
}

impl PlatformDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform_override: None,
        }
    }

    /// Supplies an explicit platform override. Empty strings are ignored.
    #[must_use]
    pub fn with_override(mut self, name: Option<impl Into<String>>) -> Self {
        self.platform_override = name.map(Into::into).filter(|name| !name.trim().is_empty());
        self
    }

    /// Runs detection against the given probe.
    ///
    /// # Errors
    ///
    /// Returns an error only if running the identification command fails in a
    /// way other than "not available"; an unrecognized host is reported as
    /// [`Platform::Unknown`], not as an error.
    pub async fn detect<P: HostProbe + Sync>(&self, probe: &P) -> Result<Detection> {
        if let Some(name) = &self.platform_override {
            let platform: Platform = name.parse().unwrap_or(Platform::Unknown);
            debug!(platform = %platform, "platform taken from override");
            return Ok(Detection {
                platform,
                source: DetectionSource::Override,
            });
        }

        if probe.var(WINDOWS_SIGNAL_VAR).as_deref() == Some(WINDOWS_SIGNAL_VALUE) {
            let path = probe.var("PATH").unwrap_or_default();
            if path.contains(NATIVE_WINDOWS_LIST_SEPARATOR) {
                debug!("Windows signal present with native list separator");
                return Ok(Detection {
                    platform: Platform::Windows,
                    source: DetectionSource::Environment,
                });
            }
            debug!("Windows signal present without native list separator");
        }

        match probe.system_name().await? {
            Some(raw) => {
                let platform = normalize_system_name(&raw);
                trace!(raw = %raw, platform = %platform, "normalized system name");
                if platform.is_recognized() {
                    Ok(Detection {
                        platform,
                        source: DetectionSource::SystemCommand(raw),
                    })
                } else {
                    Ok(Detection {
                        platform: Platform::Unknown,
                        source: DetectionSource::Undetected,
                    })
                }
            }
            None => Ok(Detection {
                platform: Platform::Unknown,
                source: DetectionSource::Undetected,
            }),
        }
    }
}

/// Maps raw `uname -s` output to a platform.
///
/// Emulation-layer spellings collapse to one canonical variant; unknown names
/// become [`Platform::Unknown`].
#[must_use]
pub fn normalize_system_name(raw: &str) -> Platform {
    let raw = raw.trim();

    if let Some((_, platform)) = EMULATION_LAYERS.iter().find(|(re, _)| re.is_match(raw)) {
        return platform.clone();
    }

    match raw.parse::<Platform>() {
        Ok(platform) if platform.is_recognized() => platform,
        _ => Platform::Unknown,
    }
}
