// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host platform detection and platform capabilities.
//!
//! ```text
//! PlatformDetector::detect(probe)       (once, in main)
//!   1. explicit override    --> verbatim
//!   2. OS=Windows_NT
//!        PATH has ';'       --> Windows
//!        otherwise          --> fall through (emulation layer)
//!   3. uname -s             --> normalized name
//!   4. nothing recognized   --> Unknown
//!        |
//!        v
//! HostCapabilities::resolve(platform)
//!   PosixBackend | WindowsBackend | fail fast
//! ```

pub mod capabilities;
pub mod detect;


use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Operating-system family the tool is running under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Platform {
    /// Native Windows.
    Windows,
    /// Linux.
    Linux,
    /// macOS.
    Darwin,
    FreeBsd,
    OpenBsd,
    NetBsd,
    /// MSYS2 / MinGW emulation layer on Windows.
    Msys,
    /// Cygwin emulation layer on Windows.
    Cygwin,
    /// A name given verbatim by an override that is not a known platform.
    Other(String),
    /// Detection found nothing usable.
    Unknown,
}

impl Platform {
    /// Every platform that has a backend.
    pub const KNOWN: &'static [Self] = &[
        Self::Windows,
        Self::Linux,
        Self::Darwin,
        Self::FreeBsd,
        Self::OpenBsd,
        Self::NetBsd,
        Self::Msys,
        Self::Cygwin,
    ];

    /// Canonical display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::FreeBsd => "FreeBSD",
            Self::OpenBsd => "OpenBSD",
            Self::NetBsd => "NetBSD",
            Self::Msys => "MSYS",
            Self::Cygwin => "Cygwin",
            Self::Other(name) => name,
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for platforms that have a backend.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_) | Self::Unknown)
    }

    /// Returns true for the native Windows family (no emulation layer).
    #[must_use]
    pub const fn is_native_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Parses a known platform name case-insensitively.
    fn from_known_name(name: &str) -> Option<Self> {
        Self::KNOWN
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
            .or_else(|| match name.to_ascii_lowercase().as_str() {
                "windows_nt" | "win32" | "win" => Some(Self::Windows),
                "macos" | "osx" => Some(Self::Darwin),
                "mingw" | "msys2" => Some(Self::Msys),
                _ => None,
            })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.name().to_string()
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    /// Known names map to their variant; anything else is kept verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Unknown);
        }
        Ok(Self::from_known_name(trimmed)
            .unwrap_or_else(|| Self::Other(trimmed.to_string())))
    }
}
