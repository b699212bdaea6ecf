//! Comparison reports
//!
//! Runs the conformance engine in both directions between a candidate module
//! and a reference module and derives soundness, completeness and equivalence.
//! Generates machine-readable (canonical and coarse JSON) and human-readable
//! (markdown) renderings.

use crate::engine::{relate, DirectionalRelation, MatchPolicy, Witness};
use crate::error::OracleError;
use crate::module::Module;
use crate::oracle::TypeOracle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Names under which the two modules appear in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleLabels {
    pub candidate: String,
    pub reference: String,
}

impl RoleLabels {
    pub fn new(candidate: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            reference: reference.into(),
        }
    }

    /// Full soundness/completeness breakdown, usually run with first-match.
    pub fn predicted_expected() -> Self {
        Self::new("predicted", "expected")
    }

    /// Coarse matched-fraction comparison, usually run with collect-all.
    pub fn generated_manual() -> Self {
        Self::new("generated", "manual")
    }
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self::new("candidate", "reference")
    }
}

impl std::str::FromStr for RoleLabels {
    type Err = String;

    /// Accepts the preset names or a custom `candidate:reference` pair.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "predicted-expected" => Ok(Self::predicted_expected()),
            "generated-manual" => Ok(Self::generated_manual()),
            "candidate-reference" => Ok(Self::default()),
            custom => match custom.split_once(':') {
                Some((candidate, reference))
                    if !candidate.trim().is_empty() && !reference.trim().is_empty() =>
                {
                    Ok(Self::new(candidate.trim(), reference.trim()))
                }
                _ => Err(format!(
                    "invalid labels '{custom}', expected predicted-expected, generated-manual, \
                     candidate-reference or <candidate>:<reference>"
                )),
            },
        }
    }
}

/// Identity of one compared module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub label: String,
    pub module: String,
    pub exports: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl ModuleSummary {
    fn of(label: &str, module: &Module) -> Self {
        Self {
            label: label.to_string(),
            module: module.id().to_string(),
            exports: module.len(),
            fingerprint: module.fingerprint().map(str::to_string),
        }
    }
}

/// Both directional relations between a candidate and a reference module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub policy: MatchPolicy,
    pub candidate: ModuleSummary,
    pub reference: ModuleSummary,
    pub soundness: bool,
    pub soundness_fraction: f64,
    pub completeness: bool,
    pub completeness_fraction: f64,
    pub equivalence: bool,
    pub equivalence_score: f64,
    /// Candidate as source, reference as target
    pub completeness_relation: DirectionalRelation,
    /// Reference as source, candidate as target
    pub soundness_relation: DirectionalRelation,
}

/// One direction of the coarse report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseDirection {
    /// `"k/n"` matched tally
    pub matched: String,
    pub candidates: IndexMap<String, Witness>,
}

/// Direction-labelled view with only the matched tally and candidate lists.
pub type CoarseReport = IndexMap<String, CoarseDirection>;

/// Compare `candidate` against `reference`.
///
/// Completeness is read off `relate(candidate, reference)` and soundness off
/// `relate(reference, candidate)`. The first oracle failure in either
/// direction aborts the comparison.
pub fn compare<O: TypeOracle + ?Sized>(
    candidate: &Module,
    reference: &Module,
    policy: MatchPolicy,
    oracle: &O,
    labels: &RoleLabels,
) -> Result<ComparisonReport, OracleError> {
    let completeness_relation = relate(candidate, reference, policy, oracle)?;
    let soundness_relation = relate(reference, candidate, policy, oracle)?;

    let report = ComparisonReport {
        policy,
        candidate: ModuleSummary::of(&labels.candidate, candidate),
        reference: ModuleSummary::of(&labels.reference, reference),
        soundness: soundness_relation.is_submodule,
        soundness_fraction: soundness_relation.fraction,
        completeness: completeness_relation.is_submodule,
        completeness_fraction: completeness_relation.fraction,
        equivalence: completeness_relation.is_submodule && soundness_relation.is_submodule,
        equivalence_score: completeness_relation.fraction * soundness_relation.fraction,
        completeness_relation,
        soundness_relation,
    };

    info!(
        "Compared {} to {}: soundness {}, completeness {}, equivalence {}",
        report.candidate.module,
        report.reference.module,
        percent(report.soundness_fraction),
        percent(report.completeness_fraction),
        percent(report.equivalence_score)
    );

    Ok(report)
}

impl ComparisonReport {
    /// Render the direction-labelled coarse view.
    pub fn coarse(&self) -> CoarseReport {
        let forward = format!("{} -> {}", self.candidate.label, self.reference.label);
        let backward = format!("{} -> {}", self.reference.label, self.candidate.label);

        let mut coarse = IndexMap::new();
        coarse.insert(forward, coarse_direction(&self.completeness_relation));
        coarse.insert(backward, coarse_direction(&self.soundness_relation));
        coarse
    }

    /// Three-line summary as printed after each comparison.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Soundness: {}", percent(self.soundness_fraction)),
            format!("Completeness: {}", percent(self.completeness_fraction)),
            format!("Equivalence: {}", percent(self.equivalence_score)),
        ]
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Conformance Report\n\n");
        md.push_str(&format!(
            "- **{}:** {} ({} exports)\n",
            self.candidate.label, self.candidate.module, self.candidate.exports
        ));
        md.push_str(&format!(
            "- **{}:** {} ({} exports)\n",
            self.reference.label, self.reference.module, self.reference.exports
        ));
        md.push_str(&format!("- **Policy:** {}\n\n", self.policy));

        md.push_str("## Summary\n\n");
        md.push_str(&format!(
            "- {} Soundness: {}\n",
            mark(self.soundness),
            percent(self.soundness_fraction)
        ));
        md.push_str(&format!(
            "- {} Completeness: {}\n",
            mark(self.completeness),
            percent(self.completeness_fraction)
        ));
        md.push_str(&format!(
            "- {} Equivalence: {}\n\n",
            mark(self.equivalence),
            percent(self.equivalence_score)
        ));

        for (title, relation) in [
            ("Completeness", &self.completeness_relation),
            ("Soundness", &self.soundness_relation),
        ] {
            md.push_str(&format!(
                "## {} ({} -> {})\n\n",
                title, relation.source, relation.target
            ));
            md.push_str(&format!("- Matched: {}\n", relation.matched_label()));

            let unmatched: Vec<_> = relation.unmatched().collect();
            if unmatched.is_empty() {
                md.push_str("- Unmatched: none\n");
            } else {
                md.push_str(&format!("- Unmatched: {}\n", unmatched.join(", ")));
            }
            md.push('\n');
        }

        md
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generate the coarse JSON report
    pub fn to_coarse_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.coarse())
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_markdown())
    }
}

fn coarse_direction(relation: &DirectionalRelation) -> CoarseDirection {
    CoarseDirection {
        matched: relation.matched_label(),
        candidates: relation.witnesses.clone(),
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Format a fraction as a whole percentage.
pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
