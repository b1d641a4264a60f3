// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fleet integration types for gitbot-fleet shared-context compatibility.
//!
//! Audit outcomes are flattened into findings the fleet coordinator and
//! SARIF consumers understand: one finding per failing or flagged slot,
//! and one per palette that could not be scored.

use crate::audit::{Classification, ContrastResult};
use crate::batch::{BatchSummary, PaletteErrorKind, PaletteOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks release
    Error,
    /// Should be addressed
    Warning,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// A finding from a palette audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule/check identifier (e.g., "WCAG-1.4.3-contrast-fail")
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub category: String,
    /// Palette file
    pub file: Option<PathBuf>,
    /// Palette slot key
    pub slot: Option<String>,
    /// Contrast ratio against bg
    pub ratio: Option<f64>,
    /// WCAG criterion reference
    pub wcag_criterion: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "contrastbot".to_string(),
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: "accessibility/palette".to_string(),
            file: None,
            slot: None,
            ratio: None,
            wcag_criterion: None,
            created_at: Utc::now(),
        }
    }

    /// Tag with WCAG 1.4.3 Contrast (Minimum), Level AA
    pub fn with_contrast_criterion(mut self) -> Self {
        self.wcag_criterion = Some("1.4.3".to_string());
        self.category = "accessibility/wcag-aa".to_string();
        self
    }

    pub fn with_file(mut self, file: &Path) -> Self {
        self.file = Some(file.to_path_buf());
        self
    }

    pub fn with_slot(mut self, slot: &str) -> Self {
        self.slot = Some(slot.to_string());
        self
    }

    pub fn with_ratio(mut self, ratio: Option<f64>) -> Self {
        self.ratio = ratio;
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, &self.slot) {
            (Some(f), Some(s)) => format!("{} [{}]", f.display(), s),
            (Some(f), None) => f.display().to_string(),
            _ => "<unknown>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    pub findings: Vec<Finding>,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Flatten a batch into findings, in palette and slot order
pub fn findings_from_summary(summary: &BatchSummary) -> FindingSet {
    let mut set = FindingSet::new();

    for outcome in &summary.palettes {
        match outcome {
            PaletteOutcome::Audited { path, report, .. } => {
                for result in &report.results {
                    if let Some(finding) = slot_finding(result, &report.bg) {
                        set.add(finding.with_file(path));
                    }
                }
            }
            PaletteOutcome::Error { path, kind, message } => {
                let rule_id = match kind {
                    PaletteErrorKind::Io => "palette-io-error",
                    PaletteErrorKind::Parse => "palette-parse-error",
                    PaletteErrorKind::MissingBackground => "palette-missing-bg",
                    PaletteErrorKind::InvalidBackground => "palette-invalid-bg",
                    PaletteErrorKind::Other => "palette-error",
                };
                set.add(Finding::new(rule_id, Severity::Error, message).with_file(path));
            }
        }
    }

    set
}

fn slot_finding(result: &ContrastResult, bg: &str) -> Option<Finding> {
    let finding = match result.classification {
        Classification::Invalid => Finding::new(
            "palette-invalid-color",
            Severity::Error,
            &format!(
                "{} value {:?} is not a valid hex color (expected #RRGGBB)",
                result.key, result.hex
            ),
        ),
        Classification::Fail => Finding::new(
            "WCAG-1.4.3-contrast-fail",
            Severity::Error,
            &format!(
                "{} ({}) {} has contrast {:.2}:1 on {}, below 3:1",
                result.key,
                result.name,
                result.hex,
                result.ratio.unwrap_or(1.0),
                bg
            ),
        )
        .with_contrast_criterion(),
        Classification::PassLarge if result.below_recommended => Finding::new(
            "WCAG-1.4.3-primary-text",
            Severity::Warning,
            &format!(
                "Primary text color {} ({}) {} has contrast {:.2}:1 on {}, below 4.5:1",
                result.key,
                result.name,
                result.hex,
                result.ratio.unwrap_or(1.0),
                bg
            ),
        )
        .with_contrast_criterion(),
        _ => return None,
    };

    Some(finding.with_slot(&result.key).with_ratio(result.ratio))
}
