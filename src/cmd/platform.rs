// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host resolution and the platform command.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ChoreError, Result};
use crate::platform::capabilities::HostCapabilities;
use crate::platform::detect::{Detection, DetectionSource, HostProbe, PlatformDetector};

/// Detects the host once and binds its capabilities.
///
/// # Errors
///
/// Returns an error if detection fails or no backend exists for the detected
/// platform.
pub async fn resolve_host<P: HostProbe + Sync>(
    config: &Config,
    probe: &P,
) -> Result<(Detection, HostCapabilities)> {
    let detection = PlatformDetector::new()
        .with_override(config.global.platform.clone())
        .detect(probe)
        .await?;
    debug!(platform = %detection.platform, source = ?detection.source, "host detected");

    let host = HostCapabilities::resolve(detection.platform.clone())
        .map_err(ChoreError::from)?
        .with_shell(config.tools.shell.clone());
    info!(platform = %detection.platform, backend = %host.kind(), "host capabilities bound");

    Ok((detection, host))
}

/// Lines printed by `platform`.
#[must_use]
pub fn platform_lines(detection: &Detection, host: &HostCapabilities) -> Vec<String> {
    let source = match &detection.source {
        DetectionSource::Override => "override".to_string(),
        DetectionSource::Environment => "environment".to_string(),
        DetectionSource::SystemCommand(raw) => format!("system command ({raw})"),
        DetectionSource::Undetected => "undetected".to_string(),
    };
    let shell = host.shell();

    vec![
        format!("platform = {}", detection.platform),
        format!("source   = {source}"),
        format!("backend  = {}", host.kind()),
        format!("shell    = {} {}", shell.program, shell.args.join(" "))
            .trim_end()
            .to_string(),
        format!("pathsep  = {}", host.list_separator()),
    ]
}

/// Main handler for platform command.
pub fn run_platform_command(detection: &Detection, host: &HostCapabilities) {
    for line in platform_lines(detection, host) {
        println!("{line}");
    }
}
