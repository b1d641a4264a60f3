// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot CLI - WCAG 2.1 contrast auditor for terminal palettes
//!
//! Part of the gitbot-fleet ecosystem.

use clap::{Parser, Subcommand, ValueEnum};
use contrastbot::audit::classify;
use contrastbot::batch::{audit_files, BatchSummary};
use contrastbot::color::Rgb;
use contrastbot::config::{default_config_path, load_config, Config};
use contrastbot::fleet::findings_from_summary;
use contrastbot::report::{generate_fleet_report, generate_report, OutputFormat};
use contrastbot::scanner::collect_palette_paths;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG 2.1 contrast auditor for terminal color palettes
#[derive(Parser)]
#[command(name = "contrastbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit palette files (or directories of them) against their bg
    Audit {
        /// Palette TOML files or directories to scan
        paths: Vec<PathBuf>,

        /// Output format (defaults to the config file, then text)
        #[arg(long)]
        format: Option<FormatArg>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the contrast ratio between two colors
    Pair {
        /// First color (#RRGGBB)
        a: String,

        /// Second color (#RRGGBB)
        b: String,
    },

    /// Run as a fleet member (machine-readable output)
    Fleet {
        /// Palette TOML files or directories to scan
        paths: Vec<PathBuf>,

        /// Config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("contrastbot=debug")
    } else {
        EnvFilter::new("contrastbot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { paths, format, output, config, verbose } => {
            init_logging(verbose);
            let config = read_config(config.as_deref())?;
            let summary = run_audit(&paths, &config);
            let format = format.map(OutputFormat::from).unwrap_or(config.format);
            let report = generate_report(&summary, format);
            write_output(&report, output.as_deref())?;

            if summary.has_failures() {
                std::process::exit(summary.exit_code());
            }
        }

        Commands::Pair { a, b } => {
            let ratio = a.parse::<Rgb>()?.contrast(&b.parse::<Rgb>()?);
            let class = classify(ratio);
            println!("{:.2}:1  {}", ratio, class);

            if class.is_failure() {
                std::process::exit(1);
            }
        }

        Commands::Fleet { paths, config, verbose } => {
            init_logging(verbose);
            let config = read_config(config.as_deref())?;
            let summary = run_audit(&paths, &config);
            let findings = findings_from_summary(&summary);
            println!("{}", generate_fleet_report(&findings));

            if findings.blocks_release() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn read_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    Ok(load_config(&path)?)
}

/// Expand inputs and audit them. Nothing to audit is a usage error.
fn run_audit(inputs: &[PathBuf], config: &Config) -> BatchSummary {
    if inputs.is_empty() {
        eprintln!("Usage: contrastbot audit <palette.toml|dir> [palette.toml|dir ...]");
        std::process::exit(1);
    }
    let paths = collect_palette_paths(inputs, &config.scan);
    if paths.is_empty() {
        eprintln!("No {} files found", config.scan.file_name);
        std::process::exit(1);
    }
    audit_files(&paths)
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
