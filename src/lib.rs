// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot - WCAG 2.1 contrast auditing for terminal color palettes
//!
//! Part of the gitbot-fleet ecosystem. Contrastbot reads terminal theme
//! palettes (TOML, 16 ANSI colors plus `fg`/`bg`) and scores every color
//! against the background using the WCAG 2.1 contrast-ratio formula.
//!
//! ## Thresholds
//!
//! - **PASS (AA)**: >= 4.5:1, safe for body text
//! - **PASS (3:1+)**: >= 3.0:1, large text and UI elements
//! - **FAIL**: < 3.0:1, unreadable on the background
//!
//! Primary text slots (color0/7/8/15) below 4.5:1 produce a warning. Slots
//! that match the background exactly are treated as intentional.

pub mod audit;
pub mod batch;
pub mod color;
pub mod config;
pub mod error;
pub mod fleet;
pub mod palette;
pub mod report;
pub mod scanner;

pub use audit::{audit_palette, AuditReport, Classification, ContrastResult};
pub use batch::{audit_files, BatchSummary, PaletteOutcome};
pub use color::{contrast_ratio, linearize, parse_hex, relative_luminance, Rgb};
pub use error::{ContrastbotError, Result};
pub use palette::{Palette, PaletteFile};
