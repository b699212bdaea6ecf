//! Declaration modules and their exported surface

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which kind of declaration produced an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Variable,
    Class,
    Interface,
    #[serde(rename = "type")]
    TypeAlias,
    Enum,
    Namespace,
    /// Re-export from another module that could not be resolved locally
    Reexport,
}

impl DeclarationKind {
    /// Whether a declaration of this kind introduces a value, as opposed to a
    /// purely type-level symbol.
    pub fn has_value(self) -> bool {
        match self {
            Self::Function | Self::Variable | Self::Class | Self::Enum | Self::Namespace => true,
            Self::Interface | Self::TypeAlias | Self::Reexport => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::TypeAlias => "type",
            Self::Enum => "enum",
            Self::Namespace => "namespace",
            Self::Reexport => "reexport",
        }
    }
}

impl std::str::FromStr for DeclarationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "function" => Ok(Self::Function),
            "variable" | "const" | "let" | "var" => Ok(Self::Variable),
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "type" => Ok(Self::TypeAlias),
            "enum" => Ok(Self::Enum),
            "namespace" | "module" => Ok(Self::Namespace),
            "reexport" => Ok(Self::Reexport),
            other => Err(format!("unknown declaration kind '{other}'")),
        }
    }
}

/// Opaque type representation handed to a [`TypeOracle`](crate::oracle::TypeOracle).
///
/// The conformance engine and the report builder never look inside; only
/// oracles interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRepr {
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,
    #[serde(rename = "type")]
    pub text: String,
}

impl TypeRepr {
    pub fn new(kind: DeclarationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            type_parameters: None,
            text: text.into(),
        }
    }

    pub fn with_type_parameters(mut self, params: impl Into<String>) -> Self {
        let params = params.into();
        self.type_parameters = if params.is_empty() { None } else { Some(params) };
        self
    }
}

impl fmt::Display for TypeRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_parameters {
            // `<T>(x: T) => T` reads as a generic signature; anything else is spaced
            Some(params) if self.text.starts_with('(') => write!(f, "{}{}", params, self.text),
            Some(params) => write!(f, "{} {}", params, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A named member of a module's public surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeRepr,
    pub has_value_declaration: bool,
}

impl Export {
    /// Create an export whose value flag follows its declaration kind.
    pub fn new(name: impl Into<String>, ty: TypeRepr) -> Self {
        let has_value_declaration = ty.kind.has_value();
        Self {
            name: name.into(),
            ty,
            has_value_declaration,
        }
    }

    pub fn with_value_declaration(mut self, has_value_declaration: bool) -> Self {
        self.has_value_declaration = has_value_declaration;
        self
    }
}

/// An immutable, ordered snapshot of a declaration module's exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    id: String,
    exports: Vec<Export>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

impl Module {
    /// Build a module, rejecting duplicate export names.
    pub fn new(id: impl Into<String>, exports: Vec<Export>) -> Result<Self, CoreError> {
        let id = id.into();
        let mut seen = HashSet::new();
        for export in &exports {
            if !seen.insert(export.name.as_str()) {
                return Err(CoreError::DuplicateExport {
                    module: id,
                    name: export.name.clone(),
                });
            }
        }

        Ok(Self {
            id,
            exports,
            fingerprint: None,
        })
    }

    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exports: Vec::new(),
            fingerprint: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exports in declaration order.
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|e| e.name.as_str())
    }
}

/// Incremental construction of a [`Module`].
pub struct ModuleBuilder {
    id: String,
    exports: Vec<Export>,
    fingerprint: Option<String>,
}

impl ModuleBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exports: Vec::new(),
            fingerprint: None,
        }
    }

    pub fn add_export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn add(self, name: impl Into<String>, kind: DeclarationKind, text: impl Into<String>) -> Self {
        self.add_export(Export::new(name, TypeRepr::new(kind, text)))
    }

    pub fn function(self, name: impl Into<String>, signature: impl Into<String>) -> Self {
        self.add(name, DeclarationKind::Function, signature)
    }

    pub fn variable(self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.add(name, DeclarationKind::Variable, ty)
    }

    pub fn fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn build(self) -> Result<Module, CoreError> {
        let module = Module::new(self.id, self.exports)?;
        Ok(match self.fingerprint {
            Some(fp) => module.with_fingerprint(fp),
            None => module,
        })
    }
}
