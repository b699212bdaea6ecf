//! Library interface for dtsconform CLI components

pub mod batch;
pub mod config;
pub mod oracle;

use anyhow::{Context, Result};
use dtsconform_core::{compare, ComparisonReport, MatchPolicy, RoleLabels, TypeOracle};
use dtsconform_parser::extract_path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use batch::{run_batch, BatchOptions, BatchSummary, ReferenceSource};
pub use config::{Config, ConfigError, OracleConfig, OracleKind};
pub use oracle::{build_oracle, CommandOracle};

/// Report rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical JSON report
    #[default]
    Json,
    /// Matched fractions and witnesses per direction
    Coarse,
    /// Human-readable summary
    Markdown,
}

impl OutputFormat {
    pub fn render(self, report: &ComparisonReport) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => report.to_json()?,
            OutputFormat::Coarse => report.to_coarse_json()?,
            OutputFormat::Markdown => report.to_markdown(),
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Coarse => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub candidate: PathBuf,
    pub reference: PathBuf,
    pub policy: MatchPolicy,
    pub labels: RoleLabels,
    pub format: OutputFormat,
    /// Report destination; stdout when absent
    pub output: Option<PathBuf>,
}

/// Compare two declaration modules and return the report.
///
/// Both modules are extracted before any comparison starts, so a missing or
/// unusable input never produces a partial report.
pub fn compare_paths(
    candidate: &Path,
    reference: &Path,
    policy: MatchPolicy,
    labels: &RoleLabels,
    oracle: &dyn TypeOracle,
) -> Result<ComparisonReport> {
    let candidate = extract_path(candidate)
        .with_context(|| format!("Failed to extract {} module", labels.candidate))?;
    let reference = extract_path(reference)
        .with_context(|| format!("Failed to extract {} module", labels.reference))?;

    compare(&candidate, &reference, policy, oracle, labels).with_context(|| {
        format!(
            "Type oracle failed comparing {} with {}",
            candidate.id(),
            reference.id()
        )
    })
}

/// Handle the `compare` command: compare, print the summary, write the report.
///
/// The summary goes to stdout when the report is written to a file and to
/// stderr when stdout carries the report itself.
pub fn run_compare(options: &CompareOptions, oracle: &dyn TypeOracle) -> Result<ComparisonReport> {
    let report = compare_paths(
        &options.candidate,
        &options.reference,
        options.policy,
        &options.labels,
        oracle,
    )?;

    let rendered = options.format.render(&report)?;
    match &options.output {
        Some(path) => {
            write_report(path, &rendered)?;
            info!("Wrote report to {:?}", path);
            for line in report.summary_lines() {
                println!("{}", line);
            }
        }
        None => {
            for line in report.summary_lines() {
                eprintln!("{}", line);
            }
            println!("{}", rendered);
        }
    }

    Ok(report)
}

/// Write a rendered report, creating parent directories as needed.
pub fn write_report(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, rendered).with_context(|| format!("Failed to write report: {}", path.display()))
}
