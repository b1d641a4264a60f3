// SPDX-License-Identifier: PMPL-1.0-or-later
//! Terminal palette documents.
//!
//! A palette file is TOML with a `[theme]` table (informational) and a
//! `[palette]` table mapping slot keys to hex colors:
//!
//! ```toml
//! [theme]
//! name = "tokyo-night"
//! variant = "dark"
//!
//! [palette]
//! bg = "#1a1b26"
//! fg = "#c0caf5"
//! color0 = "#1a1b26"
//! ```
//!
//! Only `bg`, `fg` and `color0`..`color15` are read. Other keys in the
//! palette table (cursor, selection, the nested `ui` table) are ignored.

use crate::error::{ContrastbotError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Palette keys for the 16 ANSI slots, in slot order
pub const ANSI_KEYS: [&str; 16] = [
    "color0", "color1", "color2", "color3", "color4", "color5", "color6", "color7",
    "color8", "color9", "color10", "color11", "color12", "color13", "color14", "color15",
];

/// Conventional ANSI names, indexed by slot
pub const ANSI_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright black",
    "bright red",
    "bright green",
    "bright yellow",
    "bright blue",
    "bright magenta",
    "bright cyan",
    "bright white",
];

/// Slots that render ordinary text (black, white and their bright variants)
pub const PRIMARY_TEXT_SLOTS: [usize; 4] = [0, 7, 8, 15];

/// Whether an ANSI slot is held to the body-text threshold
pub fn is_primary_text(slot: usize) -> bool {
    PRIMARY_TEXT_SLOTS.contains(&slot)
}

/// Theme metadata from the `[theme]` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeMeta {
    pub name: Option<String>,
    pub variant: Option<String>,
    pub author: Option<String>,
}

impl ThemeMeta {
    /// Build from a parsed `[theme]` table. The table is informational, so
    /// non-string values are rendered rather than rejected.
    pub fn from_table(table: &toml::Table) -> Self {
        let field = |key: &str| {
            table.get(key).and_then(|value| match value {
                toml::Value::String(s) => Some(s.clone()),
                toml::Value::Table(_) => None,
                other => Some(other.to_string()),
            })
        };
        Self {
            name: field("name"),
            variant: field("variant"),
            author: field("author"),
        }
    }
}

/// The colors of one palette. Absent or empty slots are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    bg: Option<String>,
    fg: Option<String>,
    ansi: [Option<String>; 16],
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot by key. Returns `false` if the key is not a palette slot.
    /// Empty values clear the slot.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = Some(value.into()).filter(|v| !v.is_empty());
        match key {
            "bg" => self.bg = value,
            "fg" => self.fg = value,
            _ => match ANSI_KEYS.iter().position(|k| *k == key) {
                Some(idx) => self.ansi[idx] = value,
                None => return false,
            },
        }
        true
    }

    /// Builder form of [`Palette::set`]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "bg" => self.bg(),
            "fg" => self.fg(),
            _ => ANSI_KEYS
                .iter()
                .position(|k| *k == key)
                .and_then(|idx| self.ansi(idx)),
        }
    }

    pub fn bg(&self) -> Option<&str> {
        self.bg.as_deref()
    }

    pub fn fg(&self) -> Option<&str> {
        self.fg.as_deref()
    }

    pub fn ansi(&self, slot: usize) -> Option<&str> {
        self.ansi.get(slot).and_then(|c| c.as_deref())
    }

    /// Build a palette from a parsed `[palette]` table.
    /// Non-string values are kept in their TOML rendering so they surface
    /// as invalid colors instead of vanishing.
    pub fn from_table(table: &toml::Table) -> Self {
        let mut palette = Self::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Table(_) => continue,
                other => other.to_string(),
            };
            if !palette.set(key, text) {
                debug!("Ignoring palette key {}", key);
            }
        }
        palette
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    theme: toml::Table,
    #[serde(default)]
    palette: toml::Table,
}

/// A palette loaded from disk, with its theme metadata
#[derive(Debug, Clone)]
pub struct PaletteFile {
    pub path: PathBuf,
    pub theme: ThemeMeta,
    pub palette: Palette,
}

impl PaletteFile {
    /// Read and parse a palette file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse palette TOML. `path` is used for diagnostics and as the
    /// fallback theme name.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let doc: Document = toml::from_str(content).map_err(|source| ContrastbotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            theme: ThemeMeta::from_table(&doc.theme),
            palette: Palette::from_table(&doc.palette),
        })
    }

    /// Theme name, falling back to the file path
    pub fn display_name(&self) -> String {
        self.theme
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn variant(&self) -> &str {
        self.theme.variant.as_deref().unwrap_or("unknown")
    }
}
