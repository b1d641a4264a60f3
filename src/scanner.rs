// SPDX-License-Identifier: PMPL-1.0-or-later
//! Expands command-line inputs into palette files.
//!
//! Files are taken as given. Directories are walked for files named
//! `scan.file_name`, so `contrastbot audit themes/` covers a
//! `themes/*/palette.toml` layout.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Resolve inputs to palette files, preserving argument order.
/// Files found under one directory are sorted by path.
pub fn collect_palette_paths(inputs: &[PathBuf], config: &ScanConfig) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = scan_directory(input, config);
            info!("Found {} palette(s) in {}", found.len(), input.display());
            paths.extend(found);
        } else {
            // Missing files are kept so the audit reports them
            paths.push(input.clone());
        }
    }
    paths
}

/// Walk a directory for palette files
pub fn scan_directory(dir: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(config.follow_links)
        .into_iter()
        .filter_entry(|e| {
            // The root is always entered, even if it is hidden
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !config.exclude.iter().any(|x| x == name) && !name.starts_with('.')
        })
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                debug!("Skipping entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && e.file_name().to_str() == Some(config.file_name.as_str()))
        .map(|e| e.into_path())
        .collect();

    found.sort();
    found
}
