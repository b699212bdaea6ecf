//! TypeScript declaration (`.d.ts`) front end
//!
//! Approximates the type checker's "exports of the module symbol": the scanner
//! splits the file into statements, then the export forms are resolved against
//! the declarations of the module scope and same-name declarations are merged.

mod lexer;
mod render;
mod scanner;

use crate::error::ExtractError;
use crate::Extractor;
use dtsconform_core::{DeclarationKind, Export, Module, TypeRepr};
use indexmap::IndexMap;
use scanner::{Declaration, Item, Scanner};
use tracing::{debug, instrument, warn};

/// Name given to the export produced by `export = x` when `x` is not a namespace.
pub const EXPORT_ASSIGNMENT_NAME: &str = "export=";

/// Extracts the exports of a declaration file's module symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationExtractor;

impl Extractor for DeclarationExtractor {
    type Input = str;

    #[instrument(skip(self, input), level = "debug")]
    fn extract(&self, id: &str, input: &str) -> Result<Module, ExtractError> {
        let parse_error = |line: usize, message: String| ExtractError::Parse {
            module: id.to_string(),
            line,
            message,
        };

        let tokens = lexer::tokenize(input).map_err(|e| parse_error(e.line, e.message))?;
        let items = Scanner::new(&tokens)
            .scan()
            .map_err(|e| parse_error(e.line, e.message))?;

        let (scope, implicit) =
            module_scope(&items).ok_or_else(|| ExtractError::NoModuleSymbol(id.to_string()))?;

        let exports: Vec<Export> = scope_exports(scope, implicit)
            .into_iter()
            .map(|(name, parts)| merge(name, parts))
            .collect();

        debug!("Extracted {} exports from {}", exports.len(), id);
        Ok(Module::new(id, exports)?)
    }
}

/// Locate the statements that make up the module symbol.
///
/// Returns the scope and whether its declarations are exported implicitly.
fn module_scope(items: &[Item]) -> Option<(&[Item], bool)> {
    let is_module = items
        .iter()
        .any(|item| item.is_export() || matches!(item, Item::Import));
    if is_module {
        return Some((items, false));
    }

    items.iter().find_map(|item| match item {
        Item::AmbientModule { name, body } => {
            debug!("Using ambient module '{}' as module scope", name);
            let implicit = !body.iter().any(Item::is_export_statement);
            Some((body.as_slice(), implicit))
        }
        _ => None,
    })
}

/// Collect export entries of one scope in declaration order, before merging.
fn scope_exports(items: &[Item], implicit: bool) -> IndexMap<String, Vec<Export>> {
    let mut locals: IndexMap<&str, Vec<&Declaration>> = IndexMap::new();
    for item in items {
        if let Item::Declaration(decl) = item {
            locals.entry(decl.name.as_str()).or_default().push(decl);
        }
    }

    let mut exports: IndexMap<String, Vec<Export>> = IndexMap::new();
    let mut push = |name: &str, export: Export| {
        exports.entry(name.to_string()).or_default().push(export);
    };

    for item in items {
        match item {
            Item::Declaration(decl) if decl.exported || implicit => {
                push(&decl.name, Export::new(&decl.name, decl.ty.clone()));
            }
            Item::ExportList {
                specifiers,
                from: None,
            } => {
                for spec in specifiers {
                    match locals.get(spec.local.as_str()) {
                        Some(decls) => {
                            for decl in decls {
                                push(&spec.exported, Export::new(&spec.exported, decl.ty.clone()));
                            }
                        }
                        None => {
                            warn!("Cannot resolve exported name '{}' locally", spec.local);
                            push(&spec.exported, reexport(&spec.exported, spec.local.clone()));
                        }
                    }
                }
            }
            Item::ExportList {
                specifiers,
                from: Some(source),
            } => {
                for spec in specifiers {
                    let text = if spec.local == "*" {
                        format!("import(\"{source}\")")
                    } else {
                        format!("import(\"{}\").{}", source, spec.local)
                    };
                    push(&spec.exported, reexport(&spec.exported, text));
                }
            }
            Item::ExportAll(source) => {
                warn!("Skipping 'export * from \"{}\"': target module is not resolved", source);
            }
            Item::ExportAssignment(target) => match locals.get(target.as_str()) {
                Some(decls) => {
                    for decl in decls {
                        match &decl.members {
                            Some(members) => {
                                let implicit = !members.iter().any(Item::is_export_statement);
                                for (name, parts) in scope_exports(members, implicit) {
                                    for part in parts {
                                        push(&name, part);
                                    }
                                }
                            }
                            None => push(
                                EXPORT_ASSIGNMENT_NAME,
                                Export::new(EXPORT_ASSIGNMENT_NAME, decl.ty.clone()),
                            ),
                        }
                    }
                }
                None => {
                    warn!("Cannot resolve 'export = {}' locally", target);
                    push(EXPORT_ASSIGNMENT_NAME, reexport(EXPORT_ASSIGNMENT_NAME, target.clone()));
                }
            },
            _ => {}
        }
    }

    exports
}

fn reexport(name: &str, text: String) -> Export {
    Export::new(name, TypeRepr::new(DeclarationKind::Reexport, text))
}

/// Declaration merging: one export per name.
///
/// Texts are intersected in declaration order, the value flag is the
/// disjunction and the first declaration's kind wins.
fn merge(name: String, mut parts: Vec<Export>) -> Export {
    if parts.len() == 1 {
        return parts.remove(0);
    }

    let kind = parts[0].ty.kind;
    let has_value = parts.iter().any(|p| p.has_value_declaration);
    let mut texts: Vec<String> = Vec::with_capacity(parts.len());
    for part in &parts {
        let text = part.ty.to_string();
        let text = if text.contains("=>") || text.contains(" | ") {
            format!("({text})")
        } else {
            text
        };
        if !texts.contains(&text) {
            texts.push(text);
        }
    }

    Export::new(name, TypeRepr::new(kind, texts.join(" & "))).with_value_declaration(has_value)
}
