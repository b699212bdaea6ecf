//! `dtsconform.toml` configuration
//!
//! ```toml
//! [comparison]
//! policy = "first"
//! labels = "predicted-expected"
//!
//! [oracle]
//! kind = "command"
//! program = "tsc-assignable"
//! args = ["--strict"]
//! cache = true
//! ```

use dtsconform_core::{MatchPolicy, RoleLabels};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "dtsconform.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid labels: {0}")]
    InvalidLabels(String),

    #[error("Oracle kind 'command' requires a program")]
    MissingProgram,

    #[error("Oracle kind 'table' requires a table file")]
    MissingTable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub comparison: ComparisonConfig,
    pub oracle: OracleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub policy: Option<MatchPolicy>,
    pub labels: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Identical normalized signatures only
    #[default]
    Identity,
    /// Fixed assignability table loaded from JSON
    Table,
    /// External type checker process
    Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub kind: OracleKind,
    pub program: Option<String>,
    pub args: Vec<String>,
    pub table: Option<PathBuf>,
    pub reflexive: bool,
    pub strict: bool,
    /// Memoize answers per type pair for the lifetime of the run
    pub cache: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::Identity,
            program: None,
            args: Vec::new(),
            table: None,
            reflexive: false,
            strict: false,
            cache: true,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, else `dtsconform.toml` in `dir` if
    /// present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!("Loading config from {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check settings that the TOML schema alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.labels()?;
        match self.oracle.kind {
            OracleKind::Command if self.oracle.program.is_none() => Err(ConfigError::MissingProgram),
            OracleKind::Table if self.oracle.table.is_none() => Err(ConfigError::MissingTable),
            _ => Ok(()),
        }
    }

    /// Labels set in the config file, if any.
    pub fn labels(&self) -> Result<Option<RoleLabels>, ConfigError> {
        self.comparison
            .labels
            .as_deref()
            .map(|value| value.parse().map_err(ConfigError::InvalidLabels))
            .transpose()
    }

    /// Resolve policy and labels, letting command-line values win.
    pub fn comparison_settings(
        &self,
        policy: Option<MatchPolicy>,
        labels: Option<RoleLabels>,
    ) -> Result<(MatchPolicy, RoleLabels), ConfigError> {
        let policy = policy.or(self.comparison.policy).unwrap_or_default();
        let labels = match labels {
            Some(labels) => labels,
            None => self
                .labels()?
                .unwrap_or_else(|| default_labels(policy)),
        };
        Ok((policy, labels))
    }
}

/// Conventional labels for each policy.
pub fn default_labels(policy: MatchPolicy) -> RoleLabels {
    match policy {
        MatchPolicy::First => RoleLabels::predicted_expected(),
        MatchPolicy::All => RoleLabels::generated_manual(),
    }
}
