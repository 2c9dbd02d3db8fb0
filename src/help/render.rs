// chore-rs: Cross-platform Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Help table renderers.
//!
//! Both produce the same visible text:
//!
//! ```text
//! "  " + name padded to the widest name + "  " + description
//! ```
//!
//! with trailing whitespace trimmed and one empty line per blank entry.
//! Width is counted in chars. Styles wrap the text only, never the padding.

use std::fmt;

use anstyle::Style;

use super::HelpEntry;
use crate::output::Palette;

/// Indent before the name column.
const INDENT: &str = "  ";
/// Gap between the name and description columns.
const GAP: &str = "  ";

/// Renders help entries into one buffer.
pub trait HelpRenderer: fmt::Debug + Send + Sync {
    /// Short identifier, shown by `chore platform`.
    fn name(&self) -> &'static str;

    fn render(&self, entries: &[HelpEntry], palette: &Palette) -> String;
}

/// Single pass with width specifiers after measuring the name column,
/// like `column -t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnRenderer;

/// Builds a cell table first, then pads every cell to its column width,
/// like `Format-Table`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

pub static COLUMN_RENDERER: ColumnRenderer = ColumnRenderer;
pub static TABLE_RENDERER: TableRenderer = TableRenderer;

/// Longest name in chars across the whole listing.
fn name_width(entries: &[HelpEntry]) -> usize {
    entries
        .iter()
        .map(|entry| entry.name().chars().count())
        .max()
        .unwrap_or(0)
}

fn styled(style: Style, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{style}{text}{style:#}")
    }
}

/// Header rows (no name) use the header style; task descriptions are plain.
fn description_style(name: &str, palette: &Palette) -> Style {
    if name.is_empty() {
        palette.header
    } else {
        Style::new()
    }
}

impl HelpRenderer for ColumnRenderer {
    fn name(&self) -> &'static str {
        "column"
    }

    fn render(&self, entries: &[HelpEntry], palette: &Palette) -> String {
        let width = name_width(entries);
        let mut out = String::new();

        for entry in entries {
            let HelpEntry::Row { name, description } = entry else {
                out.push('\n');
                continue;
            };
            let pad = width - name.chars().count();
            let line = format!(
                "{INDENT}{}{:pad$}{GAP}{}",
                styled(palette.accent, name),
                "",
                styled(description_style(name, palette), description.trim_end()),
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

/// One formatted cell: visible text plus its style.
struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    fn padded(&self, width: usize) -> String {
        let fill = width.saturating_sub(self.text.chars().count());
        let mut cell = styled(self.style, &self.text);
        cell.extend(std::iter::repeat_n(' ', fill));
        cell
    }
}

impl HelpRenderer for TableRenderer {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&self, entries: &[HelpEntry], palette: &Palette) -> String {
        let rows: Vec<Option<[Cell; 2]>> = entries
            .iter()
            .map(|entry| match entry {
                HelpEntry::Row { name, description } => Some([
                    Cell {
                        text: name.clone(),
                        style: palette.accent,
                    },
                    Cell {
                        text: description.trim_end().to_string(),
                        style: description_style(name, palette),
                    },
                ]),
                HelpEntry::Blank => None,
            })
            .collect();

        let mut widths = [0usize; 2];
        for cells in rows.iter().flatten() {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.text.chars().count());
            }
        }

        let lines: Vec<String> = rows
            .iter()
            .map(|row| match row {
                Some(cells) => {
                    let joined = cells
                        .iter()
                        .zip(widths)
                        .map(|(cell, width)| cell.padded(width))
                        .collect::<Vec<_>>()
                        .join(GAP);
                    format!("{INDENT}{joined}").trim_end().to_string()
                }
                None => String::new(),
            })
            .collect();

        let mut out = lines.join("\n");
        if !lines.is_empty() {
            out.push('\n');
        }
        out
    }
}
