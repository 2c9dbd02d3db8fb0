// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Help listing.
//!
//! ```text
//!  definition text                 TaskRegistry
//!  "##fmt: format code"                 |
//!        |                              |
//!  extract_entries()          entries_from_registry()
//!        \                             /
//!         +------> Vec<HelpEntry> <---+
//!                        |
//!          host.help_renderer().render()
//!          ColumnRenderer | TableRenderer
//!                        |
//!                  one buffered write
//! ```
//!
//! Marker lines:
//!
//! | Line | Entry |
//! |------|-------|
//! | `##name: text` | `Row { name, description }` |
//! | `##: text` | `Row { "", description }` |
//! | `##:` or `##` | `Blank` |
//! | `##text` | `Row { "", "text" }` |

pub mod render;

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::output::{Console, Palette};
use crate::platform::capabilities::HostCapabilities;
use crate::task::TaskSpec;
use crate::task::registry::TaskRegistry;

/// Prefix that marks a help line in definition text.
pub const MARKER: &str = "##";

/// One line of the help listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HelpEntry {
    /// A name/description pair. An empty name is a header or continuation.
    Row { name: String, description: String },
    /// An empty separator line.
    Blank,
}

impl HelpEntry {
    pub fn row(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Row {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Name column text; empty for blanks.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Row { name, .. } => name,
            Self::Blank => "",
        }
    }
}

/// Parses one line; `None` if it is not a marker line.
fn parse_marker_line(line: &str) -> Option<HelpEntry> {
    let body = line.strip_prefix(MARKER)?;

    let Some((name, description)) = body.split_once(':') else {
        let text = body.trim();
        return Some(if text.is_empty() {
            HelpEntry::Blank
        } else {
            HelpEntry::row("", text)
        });
    };

    let (name, description) = (name.trim(), description.trim());
    if name.is_empty() && description.is_empty() {
        Some(HelpEntry::Blank)
    } else {
        Some(HelpEntry::row(name, description))
    }
}

/// Extracts help entries from `##` marker lines, in source order.
#[must_use]
pub fn extract_entries(source: &str) -> Vec<HelpEntry> {
    source.lines().filter_map(parse_marker_line).collect()
}

/// Extracts help entries from each file in turn.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn extract_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<HelpEntry>> {
    let mut entries = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read help source {}", path.display()))?;
        let found = extract_entries(&text);
        debug!(path = %path.display(), entries = found.len(), "scanned help source");
        entries.extend(found);
    }
    Ok(entries)
}

/// Builds entries from the registry's visible tasks.
///
/// Tasks are grouped by section, sections in order of first appearance.
/// Each section starts with a blank line and a header row.
#[must_use]
pub fn entries_from_registry(registry: &TaskRegistry) -> Vec<HelpEntry> {
    let mut sections: Vec<(&str, Vec<&TaskSpec>)> = Vec::new();
    for spec in registry.visible() {
        match sections.iter_mut().find(|(name, _)| *name == spec.section) {
            Some((_, specs)) => specs.push(spec),
            None => sections.push((&spec.section, vec![spec])),
        }
    }

    let mut entries = Vec::new();
    for (section, specs) in sections {
        entries.push(HelpEntry::Blank);
        entries.push(HelpEntry::row("", section));
        entries.extend(
            specs
                .into_iter()
                .map(|spec| HelpEntry::row(&spec.name, &spec.description)),
        );
    }
    entries
}

/// Renders the full help text: the usage header then the table.
#[must_use]
pub fn render_help(host: &HostCapabilities, palette: &Palette, entries: &[HelpEntry]) -> String {
    let header = palette.header;
    let mut text = format!("{header}Usage:{header:#}\n");
    text.push_str(&host.help_renderer().render(entries, palette));
    text
}

/// Writes the help listing to stdout in a single write.
pub fn print_help(host: &HostCapabilities, console: &Console, entries: &[HelpEntry]) {
    console.block(&render_help(host, console.palette(), entries));
}

#[cfg(test)]
mod tests;
