// SPDX-License-Identifier: PMPL-1.0-or-later
//! Batch auditing across palette files.
//!
//! Each file is audited independently and in input order. A file that
//! cannot be read, parsed or scored is reported and counted as a single
//! failure; the rest of the batch still runs.

use crate::audit::{audit_palette, AuditReport};
use crate::error::ContrastbotError;
use crate::palette::PaletteFile;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Why a palette could not be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteErrorKind {
    Io,
    Parse,
    MissingBackground,
    InvalidBackground,
    /// Errors not produced by loading or auditing a palette
    Other,
}

/// Result of auditing one palette source
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaletteOutcome {
    Audited {
        path: PathBuf,
        name: String,
        variant: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        report: AuditReport,
    },
    Error {
        path: PathBuf,
        kind: PaletteErrorKind,
        message: String,
    },
}

impl PaletteOutcome {
    fn from_error(path: &Path, err: ContrastbotError) -> Self {
        let kind = match &err {
            ContrastbotError::Io(_) => PaletteErrorKind::Io,
            ContrastbotError::Parse { .. } => PaletteErrorKind::Parse,
            ContrastbotError::MissingBackground => PaletteErrorKind::MissingBackground,
            ContrastbotError::InvalidBackground(_) => PaletteErrorKind::InvalidBackground,
            ContrastbotError::InvalidHex(_) | ContrastbotError::Config(_) => PaletteErrorKind::Other,
        };
        warn!("{}: {}", path.display(), err);
        PaletteOutcome::Error {
            path: path.to_path_buf(),
            kind,
            message: err.to_string(),
        }
    }

    /// Failures contributed to the batch total. An unscorable palette counts once.
    pub fn failures(&self) -> usize {
        match self {
            PaletteOutcome::Audited { report, .. } => report.failures,
            PaletteOutcome::Error { .. } => 1,
        }
    }

    pub fn warnings(&self) -> usize {
        match self {
            PaletteOutcome::Audited { report, .. } => report.warnings,
            PaletteOutcome::Error { .. } => 0,
        }
    }
}

/// Audit an already-loaded palette file
pub fn audit_palette_file(file: &PaletteFile) -> PaletteOutcome {
    match audit_palette(&file.palette) {
        Ok(report) => PaletteOutcome::Audited {
            path: file.path.clone(),
            name: file.display_name(),
            variant: file.variant().to_string(),
            author: file.theme.author.clone(),
            report,
        },
        Err(e) => PaletteOutcome::from_error(&file.path, e),
    }
}

/// Audit palette TOML held in memory
pub fn audit_document(path: &Path, content: &str) -> PaletteOutcome {
    match PaletteFile::parse(content, path) {
        Ok(file) => audit_palette_file(&file),
        Err(e) => PaletteOutcome::from_error(path, e),
    }
}

/// Read and audit one palette file
pub fn audit_file(path: &Path) -> PaletteOutcome {
    info!("Auditing {}", path.display());
    match PaletteFile::load(path) {
        Ok(file) => audit_palette_file(&file),
        Err(e) => PaletteOutcome::from_error(path, e),
    }
}

/// Aggregate over every palette in a run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub palettes: Vec<PaletteOutcome>,
    pub total_failures: usize,
    pub total_warnings: usize,
}

impl BatchSummary {
    pub fn from_outcomes(palettes: Vec<PaletteOutcome>) -> Self {
        let total_failures = palettes.iter().map(PaletteOutcome::failures).sum();
        let total_warnings = palettes.iter().map(PaletteOutcome::warnings).sum();
        Self {
            palettes,
            total_failures,
            total_warnings,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.total_failures > 0
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Audit each path in order
pub fn audit_files(paths: &[PathBuf]) -> BatchSummary {
    let outcomes: Vec<PaletteOutcome> = paths
        .iter()
        .map(PathBuf::as_path)
        .map(audit_file)
        .collect();
    let summary = BatchSummary::from_outcomes(outcomes);
    info!(
        "Audited {} palette(s): {} failure(s), {} warning(s)",
        summary.palettes.len(),
        summary.total_failures,
        summary.total_warnings
    );
    summary
}
