//! Oracle construction and the external-command oracle

use crate::config::{ConfigError, OracleConfig, OracleKind};
use anyhow::{Context, Result};
use dtsconform_core::{
    AssignabilityTable, CachedOracle, IdentityOracle, OracleError, TableOracle, TypeOracle, TypeRepr,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// One assignability question as written to the oracle program's stdin.
#[derive(Debug, Serialize)]
pub struct OracleQuery<'a> {
    pub source: &'a TypeRepr,
    pub target: &'a TypeRepr,
}

/// The oracle program's answer on stdout.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OracleAnswer {
    Assignable { assignable: bool },
    Error { error: String },
}

/// Delegates each query to an external type checker process.
///
/// The program receives `{"source": .., "target": ..}` on stdin and must
/// print `{"assignable": true|false}` or `{"error": "..."}` and exit 0.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandOracle {
    pub fn new(program: &str, args: Vec<String>) -> Result<Self, OracleError> {
        let program = which::which(program)
            .map_err(|e| OracleError::Process(format!("oracle program '{program}' not found: {e}")))?;
        debug!("Using oracle program {}", program.display());
        Ok(Self { program, args })
    }
}

impl TypeOracle for CommandOracle {
    fn assignable(&self, source: &TypeRepr, target: &TypeRepr) -> Result<bool, OracleError> {
        let query = serde_json::to_vec(&OracleQuery { source, target })
            .map_err(|e| OracleError::Malformed(e.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OracleError::Process(format!("failed to start {}: {e}", self.program.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&query)
                .map_err(|e| OracleError::Process(format!("failed to write query: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OracleError::Process(e.to_string()))?;

        if !output.status.success() {
            return Err(OracleError::Process(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!("Oracle answered {} for {} <: {}", stdout.trim(), source, target);

        match serde_json::from_str::<OracleAnswer>(stdout.trim()) {
            Ok(OracleAnswer::Assignable { assignable }) => Ok(assignable),
            Ok(OracleAnswer::Error { error }) => Err(OracleError::Rejected(error)),
            Err(e) => Err(OracleError::Process(format!(
                "unparsable oracle output '{}': {e}",
                stdout.trim()
            ))),
        }
    }
}

/// Build the oracle described by the `[oracle]` config section.
pub fn build_oracle(config: &OracleConfig) -> Result<Box<dyn TypeOracle>> {
    let inner: Box<dyn TypeOracle> = match config.kind {
        OracleKind::Identity => Box::new(IdentityOracle),
        OracleKind::Table => {
            let path = config.table.as_ref().ok_or(ConfigError::MissingTable)?;
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read assignability table: {}", path.display()))?;
            let mut table: AssignabilityTable = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse assignability table: {}", path.display()))?;
            table.reflexive |= config.reflexive;
            table.strict |= config.strict;
            debug!("Loaded {} assignable pairs from {}", table.pairs.len(), path.display());
            Box::new(TableOracle::from(table))
        }
        OracleKind::Command => {
            let program = config.program.as_deref().ok_or(ConfigError::MissingProgram)?;
            Box::new(CommandOracle::new(program, config.args.clone())?)
        }
    };

    if config.cache {
        Ok(Box::new(CachedOracle::new(inner)))
    } else {
        Ok(inner)
    }
}
