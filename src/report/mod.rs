// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for palette audits.
//!
//! Supports multiple output formats:
//! - Text: per-palette contrast tables for humans
//! - JSON: the batch summary for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::audit::{AuditReport, ContrastResult};
use crate::batch::{BatchSummary, PaletteErrorKind, PaletteOutcome};
use crate::fleet::{findings_from_summary, FindingSet, Severity};
use serde::{Deserialize, Serialize};

const RULE_WIDTH: usize = 72;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

/// Generate a report for a batch
pub fn generate_report(summary: &BatchSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(summary),
        OutputFormat::Json => generate_json_report(summary),
        OutputFormat::Sarif => generate_sarif_report(&findings_from_summary(summary)),
    }
}

/// Machine-readable findings for the fleet coordinator
pub fn generate_fleet_report(findings: &FindingSet) -> String {
    serde_json::to_string_pretty(findings).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize findings: {}\"}}", e)
    })
}

fn generate_text_report(summary: &BatchSummary) -> String {
    let mut output = String::new();

    for outcome in &summary.palettes {
        match outcome {
            PaletteOutcome::Audited {
                name,
                variant,
                report,
                ..
            } => output.push_str(&render_palette(name, variant, report)),
            PaletteOutcome::Error {
                path,
                kind,
                message,
            } => {
                let line = match kind {
                    PaletteErrorKind::MissingBackground => {
                        format!("no bg color in {}", path.display())
                    }
                    // already names the file
                    PaletteErrorKind::Parse => message.clone(),
                    _ => format!("{}: {}", path.display(), message),
                };
                output.push_str(&format!("  ERROR: {}\n", line));
            }
        }
    }

    if summary.has_failures() {
        output.push_str(&format!(
            "\n  Total failures across all palettes: {}\n",
            summary.total_failures
        ));
    } else {
        output.push_str("\n  All palettes pass contrast audit.\n");
    }

    output
}

/// Contrast table for one palette
pub fn render_palette(name: &str, variant: &str, report: &AuditReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", rule));
    output.push_str(&format!("  {}  ({})  bg: {}\n", name, variant, report.bg));
    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!(
        "  {:<8} {:<10} {:<16} {:>7}  {}\n",
        "Color", "Hex", "Name", "Ratio", "Status"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(66)));

    for result in &report.results {
        output.push_str(&render_row(result));
    }

    output.push('\n');
    if report.failures > 0 {
        output.push_str(&format!(
            "  RESULT: {} failure(s): colors below 3:1 on {}\n",
            report.failures, report.bg
        ));
    } else if report.warnings > 0 {
        output.push_str(&format!(
            "  RESULT: No failures. {} primary text color(s) below 4.5:1.\n",
            report.warnings
        ));
    } else {
        output.push_str("  RESULT: All text colors >= 3:1. Primary text colors >= 4.5:1.\n");
    }
    output.push_str("  * = primary text color (color0/7/8/15)\n");

    output
}

fn render_row(result: &ContrastResult) -> String {
    let ratio = match result.ratio {
        Some(r) => format!("{:>5.2}:1", r),
        None => format!("{:>7}", "-"),
    };
    // fg rows carry no marker column
    let marker = if result.key == "fg" {
        ""
    } else if result.primary_text {
        " *"
    } else {
        "  "
    };
    format!(
        "  {:<8} {:<10} {:<16} {}  {}{}\n",
        result.key,
        result.hex,
        result.name,
        ratio,
        result.status_label(),
        marker
    )
}

fn generate_json_report(summary: &BatchSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize audit: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

fn generate_sarif_report(findings: &FindingSet) -> String {
    let results: Vec<SarifResult> = findings
        .findings
        .iter()
        .map(|f| {
            let level = match f.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            let locations = f
                .file
                .iter()
                .map(|file| SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.display().to_string(),
                        },
                    },
                })
                .collect();

            SarifResult {
                rule_id: f.rule_id.clone(),
                level: level.to_string(),
                message: SarifMessage {
                    text: f.message.clone(),
                },
                locations,
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "contrastbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/gitbot-fleet".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
