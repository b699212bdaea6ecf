use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate export '{name}' in module {module}")]
    DuplicateExport { module: String, name: String },
}

/// Failure of a single assignability query.
///
/// An oracle error is never turned into "not assignable": it aborts the whole
/// comparison so that no report with silently degraded metrics is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Malformed type representation: {0}")]
    Malformed(String),

    #[error("Unsupported type representation: {0}")]
    Unsupported(String),

    #[error("Oracle rejected query: {0}")]
    Rejected(String),

    #[error("Oracle process failed: {0}")]
    Process(String),
}
