//! Batch comparison of generated declarations against one reference
//!
//! Candidates live under `<candidates>/<mode>/<name>.d.ts`, one sub-directory
//! per generation mode. Each report is written to `<output>/<mode>/<name>.json`.

use crate::{write_report, OutputFormat};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use dtsconform_core::{compare, MatchPolicy, RoleLabels, TypeOracle};
use dtsconform_parser::{extract_path, reference_declaration_path};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const DECLARATION_SUFFIX: &str = ".d.ts";
const MANIFEST_SUFFIX: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    File(PathBuf),
    /// `<types_root>/<escaped package>/index.d.ts`
    Package { types_root: PathBuf, package: String },
}

impl ReferenceSource {
    pub fn path(&self) -> PathBuf {
        match self {
            ReferenceSource::File(path) => path.clone(),
            ReferenceSource::Package {
                types_root,
                package,
            } => reference_declaration_path(types_root, package),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub candidates: PathBuf,
    pub reference: ReferenceSource,
    pub output: PathBuf,
    pub policy: MatchPolicy,
    pub labels: RoleLabels,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub candidate: PathBuf,
    pub report: PathBuf,
    pub soundness: f64,
    pub completeness: f64,
    pub equivalence: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub candidate: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub reference: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub compared: Vec<BatchEntry>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn tally(&self) -> String {
        format!(
            "Compared {} declaration(s), {} failed ({}s, finished {})",
            self.compared.len(),
            self.failed.len(),
            (self.finished_at - self.started_at).num_seconds(),
            self.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Candidate declaration files below `root`, sorted by path.
pub fn discover_candidates(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Candidates directory not found: {}", root.display());
    }

    Ok(WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry below {}: {}", root.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.ends_with(DECLARATION_SUFFIX) || name.ends_with(MANIFEST_SUFFIX)
        })
        .map(|e| e.into_path())
        .collect())
}

/// Report location for a candidate: same relative directory, `.d.ts`
/// replaced by the format's extension.
pub fn report_path(candidates: &Path, candidate: &Path, output: &Path, format: OutputFormat) -> PathBuf {
    let relative = candidate.strip_prefix(candidates).unwrap_or(candidate);
    let file_name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(DECLARATION_SUFFIX)
        .or_else(|| file_name.strip_suffix(MANIFEST_SUFFIX))
        .unwrap_or(&file_name);

    let dir = relative.parent().map_or_else(|| output.to_path_buf(), |p| output.join(p));
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// Handle the `batch` command.
///
/// A missing reference aborts before any comparison. A candidate that cannot
/// be extracted or compared is logged and skipped.
pub fn run_batch(options: &BatchOptions, oracle: &dyn TypeOracle) -> Result<BatchSummary> {
    let started_at = Utc::now();
    let reference_path = options.reference.path();
    let reference = extract_path(&reference_path)
        .with_context(|| format!("Failed to extract {} module", options.labels.reference))?;
    info!(
        "Reference {} has {} exports",
        reference.id(),
        reference.len()
    );

    let candidates = discover_candidates(&options.candidates)?;
    if candidates.is_empty() {
        warn!("No candidate declarations under {}", options.candidates.display());
    }

    let mut compared = Vec::new();
    let mut failed = Vec::new();

    for candidate_path in candidates {
        debug!("Comparing {}", candidate_path.display());
        let outcome = extract_path(&candidate_path)
            .map_err(anyhow::Error::from)
            .and_then(|candidate| {
                compare(&candidate, &reference, options.policy, oracle, &options.labels)
                    .map_err(anyhow::Error::from)
            })
            .and_then(|report| {
                let path = report_path(&options.candidates, &candidate_path, &options.output, options.format);
                write_report(&path, &options.format.render(&report)?)?;
                Ok((report, path))
            });

        match outcome {
            Ok((report, path)) => {
                info!(
                    "{}: {}",
                    candidate_path.display(),
                    report.summary_lines().join(", ")
                );
                compared.push(BatchEntry {
                    candidate: candidate_path,
                    report: path,
                    soundness: report.soundness_fraction,
                    completeness: report.completeness_fraction,
                    equivalence: report.equivalence_score,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", candidate_path.display(), e);
                failed.push(BatchFailure {
                    candidate: candidate_path,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    let summary = BatchSummary {
        reference: reference_path,
        started_at,
        finished_at: Utc::now(),
        compared,
        failed,
    };
    println!("{}", summary.tally());
    Ok(summary)
}
