// SPDX-License-Identifier: PMPL-1.0-or-later
//! Palette contrast audit - WCAG 1.4.3 Contrast (Minimum)
//!
//! Every ANSI slot is scored against the palette background:
//! - AA: >= 4.5:1, safe for body text
//! - Large text / UI: >= 3.0:1
//! - Fail: < 3.0:1
//!
//! Slots identical to the background are intentional (e.g. color0 in a dark
//! theme) and are neither failures nor warnings. Primary text slots
//! (color0/7/8/15) that only reach 3:1 produce a warning.

use crate::color::Rgb;
use crate::error::{ContrastbotError, Result};
use crate::palette::{is_primary_text, Palette, ANSI_KEYS, ANSI_NAMES};
use serde::Serialize;
use tracing::debug;

/// WCAG AA threshold for normal text
pub const AA_THRESHOLD: f64 = 4.5;

/// WCAG threshold for large text and UI components
pub const LARGE_TEXT_THRESHOLD: f64 = 3.0;

/// Outcome of checking one color against the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Same color as the background
    Equal,
    /// >= 4.5:1
    PassAa,
    /// >= 3.0:1
    PassLarge,
    /// < 3.0:1
    Fail,
    /// Not a valid hex color
    Invalid,
}

impl Classification {
    pub fn is_failure(&self) -> bool {
        matches!(self, Classification::Fail | Classification::Invalid)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Equal => write!(f, "= bg"),
            Classification::PassAa => write!(f, "PASS (AA)"),
            Classification::PassLarge => write!(f, "PASS (3:1+)"),
            Classification::Fail => write!(f, "FAIL"),
            Classification::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Classification plus the primary-text warning flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub classification: Classification,
    pub below_recommended: bool,
}

/// Three-bucket classification by ratio alone
pub fn classify(ratio: f64) -> Classification {
    if ratio >= AA_THRESHOLD {
        Classification::PassAa
    } else if ratio >= LARGE_TEXT_THRESHOLD {
        Classification::PassLarge
    } else {
        Classification::Fail
    }
}

/// Classify an ANSI slot. The background match is checked first: a ratio
/// of exactly 1.0 would otherwise land in `Fail`.
pub fn classify_slot(ratio: f64, primary_text: bool, matches_bg: bool) -> Verdict {
    if matches_bg {
        return Verdict {
            classification: Classification::Equal,
            below_recommended: false,
        };
    }
    let classification = classify(ratio);
    Verdict {
        classification,
        below_recommended: primary_text && classification == Classification::PassLarge,
    }
}

/// Contrast result for one palette slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastResult {
    /// Palette key (`color0`..`color15` or `fg`)
    pub key: String,
    /// Value as written in the palette
    pub hex: String,
    /// ANSI name, or `foreground`
    pub name: &'static str,
    /// Ratio against bg; `None` when the value is not a valid color
    pub ratio: Option<f64>,
    pub classification: Classification,
    pub primary_text: bool,
    /// Primary text slot below 4.5:1
    pub below_recommended: bool,
}

impl ContrastResult {
    pub fn is_failure(&self) -> bool {
        self.classification.is_failure()
    }

    pub fn is_warning(&self) -> bool {
        self.below_recommended
    }

    /// Status column for the text report
    pub fn status_label(&self) -> String {
        if self.below_recommended {
            format!("{}  !! primary text below 4.5:1", self.classification)
        } else {
            self.classification.to_string()
        }
    }
}

/// Audit of a single palette
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub bg: String,
    /// ANSI slots in slot order, then `fg`
    pub results: Vec<ContrastResult>,
    pub failures: usize,
    pub warnings: usize,
}

impl AuditReport {
    fn push(&mut self, result: ContrastResult) {
        if result.is_failure() {
            self.failures += 1;
        }
        if result.is_warning() {
            self.warnings += 1;
        }
        self.results.push(result);
    }
}

/// Audit every present slot of `palette` against its `bg`
pub fn audit_palette(palette: &Palette) -> Result<AuditReport> {
    let bg_hex = palette.bg().ok_or(ContrastbotError::MissingBackground)?;
    let bg: Rgb = bg_hex
        .parse()
        .map_err(|_| ContrastbotError::InvalidBackground(bg_hex.to_string()))?;

    let mut report = AuditReport {
        bg: bg_hex.to_string(),
        results: Vec::with_capacity(17),
        failures: 0,
        warnings: 0,
    };

    for (slot, key) in ANSI_KEYS.iter().enumerate() {
        let Some(hex) = palette.ansi(slot) else {
            continue;
        };
        let primary_text = is_primary_text(slot);

        let (ratio, verdict) = match hex.parse::<Rgb>() {
            Ok(color) => {
                let ratio = color.contrast(&bg);
                // the bg match is on the written value, not the parsed color
                let matches_bg = hex.eq_ignore_ascii_case(bg_hex);
                (Some(ratio), classify_slot(ratio, primary_text, matches_bg))
            }
            Err(e) => {
                debug!("{}: {}", key, e);
                (None, invalid())
            }
        };

        report.push(ContrastResult {
            key: key.to_string(),
            hex: hex.to_string(),
            name: ANSI_NAMES[slot],
            ratio,
            classification: verdict.classification,
            primary_text,
            below_recommended: verdict.below_recommended,
        });
    }

    // fg has no bg-match carve-out and no primary-text warning
    if let Some(hex) = palette.fg() {
        let ratio = hex.parse::<Rgb>().ok().map(|fg| fg.contrast(&bg));
        report.push(ContrastResult {
            key: "fg".to_string(),
            hex: hex.to_string(),
            name: "foreground",
            ratio,
            classification: ratio.map_or(Classification::Invalid, classify),
            primary_text: false,
            below_recommended: false,
        });
    }

    Ok(report)
}

fn invalid() -> Verdict {
    Verdict {
        classification: Classification::Invalid,
        below_recommended: false,
    }
}
