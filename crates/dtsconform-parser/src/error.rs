use dtsconform_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Declaration module not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No module symbol in {0}: no export, import or ambient module declaration")]
    NoModuleSymbol(String),

    #[error("Parse error in {module} at line {line}: {message}")]
    Parse {
        module: String,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
