//! Export extraction for declaration modules
//!
//! Two front ends produce [`Module`]s: a scanner for TypeScript declaration
//! text and a loader for pre-extracted JSON export manifests.

pub mod dts;
pub mod error;
pub mod fingerprint;
pub mod manifest;
pub mod package;

use dtsconform_core::Module;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

pub use dts::DeclarationExtractor;
pub use error::ExtractError;
pub use manifest::{ExportManifest, ManifestExport, ManifestExtractor};
pub use package::{escape_package_name, reference_declaration_path, unescape_package_name};

/// Common trait for export extractors
pub trait Extractor {
    type Input: ?Sized;

    fn extract(&self, id: &str, input: &Self::Input) -> Result<Module, ExtractError>;
}

/// Extract the module stored at `path`, choosing the front end by extension.
///
/// `*.json` files are export manifests; everything else is declaration text.
/// The module id is the path as given and the module carries a fingerprint
/// of the file contents.
#[instrument(level = "debug")]
pub fn extract_path(path: &Path) -> Result<Module, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|_| ExtractError::NotFound(path.to_path_buf()))?;
    let id = path.display().to_string();

    let is_manifest = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    let module = if is_manifest {
        debug!("Reading export manifest {}", id);
        ManifestExtractor.extract(&id, &ExportManifest::from_json(&content)?)?
    } else {
        DeclarationExtractor.extract(&id, &content)?
    };

    Ok(module.with_fingerprint(fingerprint::fingerprint(content.as_bytes())))
}
