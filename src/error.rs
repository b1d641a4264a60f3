// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for contrastbot

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContrastbotError>;

#[derive(Error, Debug)]
pub enum ContrastbotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid hex color {0:?} (expected #RRGGBB)")]
    InvalidHex(String),

    #[error("palette has no bg color")]
    MissingBackground,

    #[error("bg color {0:?} is not a valid hex color")]
    InvalidBackground(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
