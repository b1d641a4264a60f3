// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration for contrastbot

use crate::error::{ContrastbotError, Result};
use crate::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report format used when `--format` is not given
    pub format: OutputFormat,
    pub scan: ScanConfig,
}

/// How directory arguments are expanded into palette files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name collected from directories
    pub file_name: String,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_name: "palette.toml".to_string(),
            exclude: vec![
                "target".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
            ],
            follow_links: false,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contrastbot")
        .join("config.toml")
}

/// Load a config file; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ContrastbotError::Config(format!("TOML parse error: {}", e)))
}
