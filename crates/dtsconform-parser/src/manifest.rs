//! Pre-extracted export manifests
//!
//! A manifest is the JSON form of a module's exports, typically produced by a
//! real type checker ahead of time:
//!
//! ```json
//! { "name": "left-pad", "exports": [{ "name": "pad", "kind": "function", "type": "(s: string) => string" }] }
//! ```

use crate::error::ExtractError;
use crate::Extractor;
use dtsconform_core::{DeclarationKind, Export, Module, TypeRepr};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `None` when the source had no module symbol
    #[serde(default)]
    pub exports: Option<Vec<ManifestExport>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestExport {
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,
    #[serde(rename = "type")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_value_declaration: Option<bool>,
}

impl ExportManifest {
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Snapshot a module back into manifest form.
    pub fn from_module(module: &Module) -> Self {
        Self {
            name: Some(module.id().to_string()),
            exports: Some(
                module
                    .exports()
                    .iter()
                    .map(|e| ManifestExport {
                        name: e.name.clone(),
                        kind: e.ty.kind,
                        type_parameters: e.ty.type_parameters.clone(),
                        text: e.ty.text.clone(),
                        has_value_declaration: Some(e.has_value_declaration),
                    })
                    .collect(),
            ),
        }
    }
}

impl From<ManifestExport> for Export {
    fn from(entry: ManifestExport) -> Self {
        let ty = TypeRepr::new(entry.kind, entry.text)
            .with_type_parameters(entry.type_parameters.unwrap_or_default());
        let export = Export::new(entry.name, ty);
        match entry.has_value_declaration {
            Some(flag) => export.with_value_declaration(flag),
            None => export,
        }
    }
}

/// Builds modules from [`ExportManifest`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestExtractor;

impl Extractor for ManifestExtractor {
    type Input = ExportManifest;

    #[instrument(skip(self, input), level = "debug")]
    fn extract(&self, id: &str, input: &ExportManifest) -> Result<Module, ExtractError> {
        let entries = input
            .exports
            .as_ref()
            .ok_or_else(|| ExtractError::NoModuleSymbol(id.to_string()))?;

        let exports: Vec<Export> = entries.iter().cloned().map(Export::from).collect();
        debug!("Loaded {} exports from manifest {}", exports.len(), id);
        Ok(Module::new(id, exports)?)
    }
}
