// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for contrastbot

use contrastbot::batch::{audit_files, PaletteOutcome};
use contrastbot::config::ScanConfig;
use contrastbot::fleet::findings_from_summary;
use contrastbot::report::{generate_report, OutputFormat};
use contrastbot::scanner::collect_palette_paths;
use contrastbot::Classification;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const TOKYO_NIGHT: &str = r##"
[theme]
name = "tokyo-night"
author = "enkia"
variant = "dark"

[palette]
bg = "#1a1b26"
fg = "#c0caf5"
cursor = "#c0caf5"
selection_bg = "#33467c"
color0 = "#1a1b26"
color1 = "#f7768e"
color2 = "#9ece6a"
color3 = "#e0af68"
color4 = "#7aa2f7"
color5 = "#bb9af7"
color6 = "#7dcfff"
color7 = "#a9b1d6"
color8 = "#737aa2"
color9 = "#f7768e"
color10 = "#9ece6a"
color11 = "#e0af68"
color12 = "#7aa2f7"
color13 = "#bb9af7"
color14 = "#7dcfff"
color15 = "#c0caf5"

[palette.ui]
accent = "#7dcfff"
"##;

const MURKY: &str = r##"
[theme]
name = "murky"
variant = "dark"

[palette]
bg = "#000000"
fg = "#ffffff"
color1 = "#330000"
color4 = "#000033"
color7 = "#ffffff"
"##;

const PAPER: &str = r##"
[theme]
name = "paper"
variant = "light"

[palette]
bg = "#ffffff"
fg = "#000000"
color0 = "#000000"
color7 = "#595959"
color15 = "#ffffff"
"##;

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_palette_audit() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "tokyo-night/palette.toml", TOKYO_NIGHT);

    let summary = audit_files(&[path]);
    let PaletteOutcome::Audited { name, variant, author, report, .. } = &summary.palettes[0] else {
        panic!("expected an audited palette, got {:?}", summary.palettes[0]);
    };

    assert_eq!(name, "tokyo-night");
    assert_eq!(variant, "dark");
    assert_eq!(author.as_deref(), Some("enkia"));
    // 16 ANSI slots plus fg
    assert_eq!(report.results.len(), 17);
    assert_eq!(report.results[0].classification, Classification::Equal);
    assert_eq!(report.results[15].classification, Classification::PassAa);
    assert_eq!(report.results[16].key, "fg");
    assert_eq!(report.results[16].classification, Classification::PassAa);
    assert_eq!(report.failures, 0);
}

#[test]
fn test_batch_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write(dir.path(), "a/palette.toml", PAPER),
        write(dir.path(), "b/palette.toml", MURKY),
        write(dir.path(), "c/palette.toml", PAPER),
    ];

    let summary = audit_files(&paths);
    assert_eq!(summary.palettes.len(), 3);
    assert_eq!(summary.palettes[0].failures(), 0);
    assert_eq!(summary.palettes[1].failures(), 2);
    assert_eq!(summary.palettes[2].failures(), 0);
    assert_eq!(summary.total_failures, 2);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_directory_scan_then_audit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "themes/paper/palette.toml", PAPER);
    write(dir.path(), "themes/broken/palette.toml", "[palette\nbg = ");
    write(dir.path(), "themes/nobg/palette.toml", "[theme]\nname = \"nobg\"\n[palette]\nfg = \"#ffffff\"\n");

    let paths = collect_palette_paths(&[dir.path().join("themes")], &ScanConfig::default());
    assert_eq!(paths.len(), 3);

    let summary = audit_files(&paths);
    // broken, nobg, paper in path order; each unscorable file counts once
    assert_eq!(summary.total_failures, 2);

    let report = generate_report(&summary, OutputFormat::Text);
    assert!(report.contains("TOML parse error"));
    assert!(report.contains("ERROR: no bg color in"));
    assert!(report.contains("  paper  (light)  bg: #ffffff"));
    assert!(report.contains("Total failures across all palettes: 2"));
}

#[test]
fn test_json_and_fleet_outputs_agree() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "murky.toml", MURKY);
    let summary = audit_files(&[path]);

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&summary, OutputFormat::Json)).expect("valid JSON");
    assert_eq!(json["total_failures"], 2);

    let findings = findings_from_summary(&summary);
    assert_eq!(findings.errors().len(), 2);
    assert!(findings.blocks_release());
}

fn contrastbot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_contrastbot"))
}

#[test]
fn test_cli_exit_status() {
    let dir = TempDir::new().unwrap();
    let paper = write(dir.path(), "paper.toml", PAPER);
    let murky = write(dir.path(), "murky.toml", MURKY);
    let config = dir.path().join("no-config.toml");

    let ok = contrastbot()
        .arg("audit")
        .arg(&paper)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(ok.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&ok.stdout).contains("All palettes pass contrast audit."));

    let failing = contrastbot()
        .arg("audit")
        .arg(&paper)
        .arg(&murky)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(failing.status.code(), Some(1));

    let none = contrastbot()
        .arg("audit")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(none.status.code(), Some(1));
}

#[test]
fn test_cli_directory_without_palettes_exits_one() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "themes/readme.txt", "nothing here");
    let config = dir.path().join("no-config.toml");

    let out = contrastbot()
        .arg("audit")
        .arg(dir.path().join("themes"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No palette.toml files found"));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("All palettes pass"));
}

#[test]
fn test_cli_pair() {
    let out = contrastbot().args(["pair", "#000000", "#ffffff"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "21.00:1  PASS (AA)");

    let out = contrastbot().args(["pair", "#777777", "#888888"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}
