//! Directional conformance between two modules
//!
//! [`relate`] walks the target module's exports in declaration order and, for
//! each one, looks for source exports whose type the oracle deems assignable.

use crate::error::OracleError;
use crate::module::Module;
use crate::oracle::TypeOracle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How many witnesses to record per target export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Stop at the first witness in source declaration order.
    ///
    /// Which witness gets recorded depends on source ordering alone when
    /// several source exports qualify. Treat it as a stable but arbitrary
    /// choice, not a ranking.
    #[default]
    First,
    /// Record every witness in source declaration order.
    All,
}

impl MatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::All => "all",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "all" => Ok(Self::All),
            other => Err(format!(
                "invalid match policy '{other}', expected one of: first, all"
            )),
        }
    }
}

/// Evidence recorded for one target export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Witness {
    /// First-match policy: the winning source export, if any
    First(Option<String>),
    /// Collect-all policy: every matching source export, possibly none
    All(Vec<String>),
}

impl Witness {
    pub fn is_matched(&self) -> bool {
        match self {
            Self::First(name) => name.is_some(),
            Self::All(names) => !names.is_empty(),
        }
    }

    /// Witness names in source declaration order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::First(name) => name.iter().map(String::as_str).collect(),
            Self::All(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Match statistics for one `(source, target)` direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalRelation {
    pub source: String,
    pub target: String,
    pub matched_count: usize,
    pub total: usize,
    pub fraction: f64,
    pub is_submodule: bool,
    /// Keyed by target export name, in target declaration order
    pub witnesses: IndexMap<String, Witness>,
}

impl DirectionalRelation {
    /// Target exports that found no witness, in declaration order.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.witnesses
            .iter()
            .filter(|(_, w)| !w.is_matched())
            .map(|(name, _)| name.as_str())
    }

    /// The `"k/n"` tally used by the coarse report.
    pub fn matched_label(&self) -> String {
        format!("{}/{}", self.matched_count, self.total)
    }
}

/// Relate `source` to `target`: which target exports can be realized by some
/// source export.
///
/// The first oracle failure aborts the computation and is returned unchanged.
pub fn relate<O: TypeOracle + ?Sized>(
    source: &Module,
    target: &Module,
    policy: MatchPolicy,
    oracle: &O,
) -> Result<DirectionalRelation, OracleError> {
    let mut witnesses = IndexMap::with_capacity(target.len());
    let mut matched_count = 0;

    for wanted in target.exports() {
        let witness = match policy {
            MatchPolicy::First => {
                let mut found = None;
                for candidate in source.exports() {
                    if oracle.assignable(&candidate.ty, &wanted.ty)? {
                        found = Some(candidate.name.clone());
                        break;
                    }
                }
                Witness::First(found)
            }
            MatchPolicy::All => {
                let mut found = Vec::new();
                for candidate in source.exports() {
                    if oracle.assignable(&candidate.ty, &wanted.ty)? {
                        found.push(candidate.name.clone());
                    }
                }
                Witness::All(found)
            }
        };

        if witness.is_matched() {
            matched_count += 1;
            debug!("{}: '{}' witnessed by {:?}", target.id(), wanted.name, witness.names());
        } else {
            debug!("{}: '{}' has no witness in {}", target.id(), wanted.name, source.id());
        }
        witnesses.insert(wanted.name.clone(), witness);
    }

    let total = target.len();
    let fraction = if total == 0 {
        1.0
    } else {
        matched_count as f64 / total as f64
    };

    debug!(
        "Related {} -> {}: {}/{} matched ({} policy)",
        source.id(),
        target.id(),
        matched_count,
        total,
        policy
    );

    Ok(DirectionalRelation {
        source: source.id().to_string(),
        target: target.id().to_string(),
        matched_count,
        total,
        fraction,
        is_submodule: matched_count == total,
        witnesses,
    })
}
