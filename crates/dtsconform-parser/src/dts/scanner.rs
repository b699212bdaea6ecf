//! Statement-level scanner for declaration files
//!
//! Recognizes top-level declarations and export forms without building a full
//! syntax tree. Type positions are kept as token slices and rendered to
//! canonical text.

use super::lexer::Token;
use super::render::{render, render_block};
use dtsconform_core::{DeclarationKind, TypeRepr};
use tracing::trace;

/// Keywords that start a new statement when they follow a line break.
const STATEMENT_KEYWORDS: &[&str] = &[
    "export",
    "declare",
    "function",
    "interface",
    "class",
    "const",
    "let",
    "var",
    "enum",
    "namespace",
    "module",
    "import",
    "abstract",
    "type",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub exported: bool,
    pub ty: TypeRepr,
    /// Members of a namespace declaration
    pub members: Option<Vec<Item>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Declaration(Declaration),
    /// `export = target`
    ExportAssignment(String),
    /// `export { a, b as c } [from "m"]`
    ExportList {
        specifiers: Vec<ExportSpecifier>,
        from: Option<String>,
    },
    /// `export * from "m"`
    ExportAll(String),
    Import,
    /// `declare module "name" { ... }`
    AmbientModule { name: String, body: Vec<Item> },
    Other,
}

impl Item {
    /// Whether this item makes its enclosing scope an explicit-export scope.
    pub fn is_export(&self) -> bool {
        match self {
            Item::Declaration(decl) => decl.exported,
            Item::ExportAssignment(_) | Item::ExportList { .. } | Item::ExportAll(_) => true,
            _ => false,
        }
    }

    /// Export declarations and `export =` turn off the implicit exports of an
    /// ambient module or namespace body. Export modifiers do not.
    pub fn is_export_statement(&self) -> bool {
        matches!(
            self,
            Item::ExportAssignment(_) | Item::ExportList { .. } | Item::ExportAll(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

pub struct Scanner<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Scan every statement in the token stream.
    pub fn scan(mut self) -> Result<Vec<Item>, ScanError> {
        let mut items = Vec::new();
        while !self.at_end() {
            if self.eat(";") {
                continue;
            }
            let before = self.pos;
            self.scan_item(&mut items)?;
            if self.pos == before {
                // Stray token such as an unmatched closer
                return Err(self.error(format!("unexpected token '{}'", self.tokens[before].text)));
            }
        }
        Ok(items)
    }

    fn scan_item(&mut self, items: &mut Vec<Item>) -> Result<(), ScanError> {
        if self.peek_is("import") {
            self.skip_statement();
            items.push(Item::Import);
            return Ok(());
        }

        let mut exported = false;
        let mut default = false;

        if self.eat("export") {
            exported = true;

            // `export type { A }` and `export type * from "m"`
            if self.peek_is("type") && (self.peek_at_is(1, "{") || self.peek_at_is(1, "*")) {
                self.pos += 1;
            }

            if self.eat("=") {
                let target = self.read_statement(false);
                items.push(Item::ExportAssignment(render(target)));
                return Ok(());
            }
            if self.peek_is("{") {
                let group = self.group()?;
                let specifiers = parse_specifiers(group);
                let from = self.read_from_clause();
                self.skip_statement();
                items.push(Item::ExportList { specifiers, from });
                return Ok(());
            }
            if self.eat("*") {
                if self.eat("as") {
                    let alias = self.ident().unwrap_or_default();
                    let from = self.read_from_clause();
                    self.skip_statement();
                    items.push(Item::ExportList {
                        specifiers: vec![ExportSpecifier {
                            local: "*".to_string(),
                            exported: alias,
                        }],
                        from,
                    });
                } else {
                    let from = self.read_from_clause().unwrap_or_default();
                    self.skip_statement();
                    items.push(Item::ExportAll(from));
                }
                return Ok(());
            }
            if self.peek_is("as") || self.peek_is("import") {
                // `export as namespace X`, `export import A = B`
                self.skip_statement();
                items.push(Item::Other);
                return Ok(());
            }
            if self.eat("default") {
                default = true;
                if !self.at_declaration_keyword() {
                    let expr = self.read_statement(false);
                    if expr.len() == 1 && expr[0].is_ident() {
                        items.push(Item::ExportList {
                            specifiers: vec![ExportSpecifier {
                                local: expr[0].text.clone(),
                                exported: "default".to_string(),
                            }],
                            from: None,
                        });
                    } else {
                        items.push(Item::Declaration(Declaration {
                            name: "default".to_string(),
                            exported: true,
                            ty: TypeRepr::new(DeclarationKind::Variable, render(expr)),
                            members: None,
                        }));
                    }
                    return Ok(());
                }
            }
        }

        while self.peek_is("declare") || self.peek_is("abstract") || self.peek_is("async") {
            self.pos += 1;
        }

        let Some(keyword) = self.peek().map(|t| t.text.clone()) else {
            return Ok(());
        };

        let mut decls = match keyword.as_str() {
            "function" => {
                self.pos += 1;
                vec![self.function()?]
            }
            "const" if self.peek_at_is(1, "enum") => {
                self.pos += 2;
                vec![self.enumeration()?]
            }
            "const" | "let" | "var" => {
                self.pos += 1;
                self.variables()
            }
            "class" => {
                self.pos += 1;
                vec![self.class()?]
            }
            "interface" => {
                self.pos += 1;
                vec![self.interface()?]
            }
            "type" if self.peek_at(1).map_or(false, Token::is_ident) => {
                self.pos += 1;
                vec![self.type_alias()]
            }
            "enum" => {
                self.pos += 1;
                vec![self.enumeration()?]
            }
            "namespace" | "module" => {
                self.pos += 1;
                if self.peek().map_or(false, |t| t.kind == super::lexer::TokenKind::Str) {
                    let name = self.next_text().trim_matches('"').to_string();
                    let body = if self.peek_is("{") {
                        Scanner::new(self.group()?).scan()?
                    } else {
                        self.skip_statement();
                        Vec::new()
                    };
                    items.push(Item::AmbientModule { name, body });
                    return Ok(());
                }
                vec![self.namespace()?]
            }
            "global" => {
                self.pos += 1;
                if self.peek_is("{") {
                    self.group()?;
                }
                items.push(Item::Other);
                return Ok(());
            }
            other => {
                trace!("Skipping statement starting with '{}'", other);
                self.skip_statement();
                items.push(Item::Other);
                return Ok(());
            }
        };

        for decl in &mut decls {
            decl.exported = exported;
            if default {
                decl.name = "default".to_string();
            }
        }
        items.extend(decls.into_iter().map(Item::Declaration));
        Ok(())
    }

    fn function(&mut self) -> Result<Declaration, ScanError> {
        let name = self.ident().unwrap_or_else(|| "default".to_string());
        let type_parameters = self.type_parameters()?;
        if !self.peek_is("(") {
            return Err(self.error(format!("expected parameter list for function '{name}'")));
        }
        let params = self.group()?;
        let ret = if self.eat(":") {
            render(self.read_statement(false))
        } else {
            self.eat(";");
            "any".to_string()
        };

        let text = format!("({}) => {}", render(params), ret);
        Ok(Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(DeclarationKind::Function, text).with_type_parameters(type_parameters),
            members: None,
        })
    }

    fn variables(&mut self) -> Vec<Declaration> {
        let mut decls = Vec::new();
        loop {
            let Some(name) = self.ident() else {
                // Destructuring patterns declare nothing we can name
                self.skip_statement();
                break;
            };
            let text = if self.eat(":") {
                render(self.read_statement(true))
            } else if self.eat("=") {
                render(self.read_statement(true))
            } else {
                "any".to_string()
            };
            decls.push(Declaration {
                name,
                exported: false,
                ty: TypeRepr::new(DeclarationKind::Variable, text),
                members: None,
            });
            if !self.eat(",") {
                break;
            }
        }
        decls
    }

    fn class(&mut self) -> Result<Declaration, ScanError> {
        let name = self.ident().unwrap_or_else(|| "default".to_string());
        let type_parameters = self.type_parameters()?;
        let heritage = self.read_until_block();
        let body = self.block(&name)?;

        let text = if heritage.is_empty() {
            format!("class {}", render_block(body))
        } else {
            format!("class {} {}", render(heritage), render_block(body))
        };
        Ok(Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(DeclarationKind::Class, text).with_type_parameters(type_parameters),
            members: None,
        })
    }

    fn interface(&mut self) -> Result<Declaration, ScanError> {
        let name = self.ident().unwrap_or_else(|| "default".to_string());
        let type_parameters = self.type_parameters()?;
        let heritage = self.read_until_block();
        let body = self.block(&name)?;

        let mut parts: Vec<String> = Vec::new();
        if heritage.first().map_or(false, |t| t.is("extends")) {
            parts.extend(split_top_level(&heritage[1..]).into_iter().map(render));
        }
        parts.push(render_block(body));

        Ok(Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(DeclarationKind::Interface, parts.join(" & "))
                .with_type_parameters(type_parameters),
            members: None,
        })
    }

    fn type_alias(&mut self) -> Declaration {
        let name = self.next_text();
        let type_parameters = self.type_parameters().unwrap_or_default();
        let text = if self.eat("=") {
            render(self.read_statement(false))
        } else {
            self.skip_statement();
            "any".to_string()
        };
        Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(DeclarationKind::TypeAlias, text).with_type_parameters(type_parameters),
            members: None,
        }
    }

    fn enumeration(&mut self) -> Result<Declaration, ScanError> {
        let name = self.ident().unwrap_or_default();
        let body = self.block(&name)?;
        Ok(Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(DeclarationKind::Enum, format!("enum {}", render_block(body))),
            members: None,
        })
    }

    fn namespace(&mut self) -> Result<Declaration, ScanError> {
        let name = self.ident().unwrap_or_default();
        // `namespace A.B.C` nests; the outermost name is what the scope sees
        while self.eat(".") {
            if let Some(inner) = self.ident() {
                trace!("Flattening nested namespace {}.{}", name, inner);
            }
        }
        if name.is_empty() {
            return Err(self.error("expected namespace name".to_string()));
        }
        let body = self.block(&name)?;
        let members = Scanner::new(body).scan()?;
        Ok(Declaration {
            name,
            exported: false,
            ty: TypeRepr::new(
                DeclarationKind::Namespace,
                format!("namespace {}", render_block(body)),
            ),
            members: Some(members),
        })
    }

    /// Optional `<...>` type parameter list, rendered with its brackets.
    fn type_parameters(&mut self) -> Result<String, ScanError> {
        if !self.peek_is("<") {
            return Ok(String::new());
        }
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            self.pos += 1;
            match tok.text.as_str() {
                "<" => depth += 1,
                ">" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(render(&self.tokens[start..self.pos]));
                    }
                }
                _ => {}
            }
        }
        Err(ScanError {
            line: self.tokens[start].line,
            message: "unterminated type parameter list".to_string(),
        })
    }

    /// Balanced group starting at the current opener; returns its contents.
    fn group(&mut self) -> Result<&'a [Token], ScanError> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            self.pos += 1;
            match tok.text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(&self.tokens[start + 1..self.pos - 1]);
                    }
                }
                _ => {}
            }
        }
        Err(ScanError {
            line: self.tokens.get(start).map_or(0, |t| t.line),
            message: format!(
                "unbalanced '{}'",
                self.tokens.get(start).map_or("", |t| t.text.as_str())
            ),
        })
    }

    fn block(&mut self, owner: &str) -> Result<&'a [Token], ScanError> {
        if !self.peek_is("{") {
            return Err(self.error(format!("expected '{{' after '{owner}'")));
        }
        self.group()
    }

    /// Tokens up to (not including) the next top-level `{`.
    fn read_until_block(&mut self) -> &'a [Token] {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match tok.text.as_str() {
                "{" if depth == 0 => break,
                "(" | "[" | "<" => depth += 1,
                ")" | "]" | ">" => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }
        &self.tokens[start..self.pos]
    }

    /// Tokens up to the end of the current statement.
    ///
    /// Stops at a top-level `;` (consumed), an enclosing `}` (not consumed), a
    /// line break before a statement keyword, or with `stop_at_comma` a
    /// top-level `,` (not consumed).
    fn read_statement(&mut self, stop_at_comma: bool) -> &'a [Token] {
        let start = self.pos;
        let mut depth = 0usize;
        let mut angle = 0usize;
        while let Some(tok) = self.peek() {
            if depth == 0 {
                if tok.is(";") {
                    self.pos += 1;
                    return &self.tokens[start..self.pos - 1];
                }
                if tok.is("}") || tok.is(")") || tok.is("]") {
                    break;
                }
                if stop_at_comma && angle == 0 && tok.is(",") {
                    break;
                }
                if self.pos > start && tok.newline_before && is_statement_keyword(tok) {
                    break;
                }
            }
            match tok.text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                "<" => angle += 1,
                ">" => angle = angle.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }
        &self.tokens[start..self.pos]
    }

    fn skip_statement(&mut self) {
        self.read_statement(false);
    }

    fn read_from_clause(&mut self) -> Option<String> {
        if self.eat("from") {
            self.peek()
                .filter(|t| t.kind == super::lexer::TokenKind::Str)
                .map(|t| t.text.trim_matches('"').to_string())
        } else {
            None
        }
    }

    fn at_declaration_keyword(&self) -> bool {
        matches!(
            self.peek().map(|t| t.text.as_str()),
            Some("function" | "class" | "interface" | "abstract" | "async" | "enum" | "declare")
        )
    }

    fn ident(&mut self) -> Option<String> {
        let tok = self.peek().filter(|t| t.is_ident())?;
        // Keywords that begin the next construct are not names
        if matches!(tok.text.as_str(), "extends" | "implements") {
            return None;
        }
        let text = tok.text.clone();
        self.pos += 1;
        Some(text)
    }

    fn next_text(&mut self) -> String {
        let text = self.peek().map(|t| t.text.clone()).unwrap_or_default();
        self.pos += 1;
        text
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn peek_is(&self, text: &str) -> bool {
        self.peek().map_or(false, |t| t.is(text))
    }

    fn peek_at_is(&self, offset: usize, text: &str) -> bool {
        self.peek_at(offset).map_or(false, |t| t.is(text))
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.peek_is(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn error(&self, message: String) -> ScanError {
        let line = self
            .peek()
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.line);
        ScanError { line, message }
    }
}

fn is_statement_keyword(tok: &Token) -> bool {
    tok.is_ident() && STATEMENT_KEYWORDS.contains(&tok.text.as_str())
}

/// Split at top-level commas, respecting `<>`, `()`, `[]` and `{}`.
fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        match tok.text.as_str() {
            "(" | "[" | "{" | "<" => depth += 1,
            ")" | "]" | "}" | ">" => depth = depth.saturating_sub(1),
            "," if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

fn parse_specifiers(group: &[Token]) -> Vec<ExportSpecifier> {
    split_top_level(group)
        .into_iter()
        .filter_map(|part| {
            // `type X` in a mixed export list
            let part = if part.len() > 1 && part[0].is("type") && !part[1].is("as") {
                &part[1..]
            } else {
                part
            };
            let local = part.first()?.text.clone();
            let exported = match part.iter().position(|t| t.is("as")) {
                Some(idx) => part.get(idx + 1)?.text.clone(),
                None => local.clone(),
            };
            Some(ExportSpecifier { local, exported })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn scan(source: &str) -> Vec<Item> {
        let tokens = tokenize(source).unwrap();
        Scanner::new(&tokens).scan().unwrap()
    }

    fn decl(item: &Item) -> &Declaration {
        match item {
            Item::Declaration(d) => d,
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_exported_function() {
        let items = scan("export declare function add<T>(a: T, b: T): T;");
        assert_eq!(items.len(), 1);
        let d = decl(&items[0]);
        assert_eq!(d.name, "add");
        assert!(d.exported);
        assert_eq!(d.ty.kind, DeclarationKind::Function);
        assert_eq!(d.ty.text, "(a: T, b: T) => T");
        assert_eq!(d.ty.type_parameters.as_deref(), Some("<T>"));
    }

    #[test]
    fn test_function_without_return_type() {
        let items = scan("export function noop()\nexport const x: number");
        assert_eq!(decl(&items[0]).ty.text, "() => any");
        assert_eq!(decl(&items[1]).name, "x");
    }

    #[test]
    fn test_multiple_declarators() {
        let items = scan("export const a: Map<string, number>, b = 5;");
        assert_eq!(items.len(), 2);
        assert_eq!(decl(&items[0]).ty.text, "Map<string, number>");
        assert_eq!(decl(&items[1]).name, "b");
        assert_eq!(decl(&items[1]).ty.text, "5");
    }

    #[test]
    fn test_interface_with_heritage() {
        let items = scan("export interface Opts extends Base, Other<T> { debug?: boolean; }");
        let d = decl(&items[0]);
        assert_eq!(d.ty.kind, DeclarationKind::Interface);
        assert_eq!(d.ty.text, "Base & Other<T> & { debug?: boolean }");
    }

    #[test]
    fn test_class_and_enum() {
        let items = scan(
            "export declare class Client<T> extends Base { constructor(url: string); get(): T; }\n\
             export const enum Level { Low = 1, High }",
        );
        let class = decl(&items[0]);
        assert_eq!(class.ty.text, "class extends Base { constructor(url: string); get(): T }");
        assert_eq!(class.ty.type_parameters.as_deref(), Some("<T>"));
        let level = decl(&items[1]);
        assert_eq!(level.ty.kind, DeclarationKind::Enum);
        assert_eq!(level.ty.text, "enum { Low = 1, High }");
    }

    #[test]
    fn test_multiline_type_alias() {
        let items = scan("export type Mode =\n  | 'fast'\n  | 'slow'\nexport type Id = string");
        assert_eq!(decl(&items[0]).ty.text, "\"fast\" | \"slow\"");
        assert_eq!(decl(&items[1]).ty.text, "string");
    }

    #[test]
    fn test_export_forms() {
        let items = scan(
            "export = lib;\nexport { a, b as c, type D };\nexport * from './x';\n\
             export * as ns from \"./y\";\nexport as namespace Lib;\nimport fs = require('fs');",
        );
        assert_eq!(items[0], Item::ExportAssignment("lib".to_string()));
        match &items[1] {
            Item::ExportList { specifiers, from } => {
                assert!(from.is_none());
                let pairs: Vec<_> = specifiers
                    .iter()
                    .map(|s| (s.local.as_str(), s.exported.as_str()))
                    .collect();
                assert_eq!(pairs, vec![("a", "a"), ("b", "c"), ("D", "D")]);
            }
            other => panic!("Expected export list, got {:?}", other),
        }
        assert_eq!(items[2], Item::ExportAll("./x".to_string()));
        match &items[3] {
            Item::ExportList { specifiers, from } => {
                assert_eq!(from.as_deref(), Some("./y"));
                assert_eq!(specifiers[0].exported, "ns");
            }
            other => panic!("Expected export list, got {:?}", other),
        }
        assert_eq!(items[4], Item::Other);
        assert_eq!(items[5], Item::Import);
    }

    #[test]
    fn test_type_only_export_forms() {
        let items = scan(
            "export type { A, B as Bee };\nexport type { C } from './c';\nexport type * from './d';\n\
             export type E = string;",
        );
        match &items[0] {
            Item::ExportList { specifiers, from } => {
                assert!(from.is_none());
                let pairs: Vec<_> = specifiers
                    .iter()
                    .map(|s| (s.local.as_str(), s.exported.as_str()))
                    .collect();
                assert_eq!(pairs, vec![("A", "A"), ("B", "Bee")]);
            }
            other => panic!("Expected export list, got {:?}", other),
        }
        match &items[1] {
            Item::ExportList { specifiers, from } => {
                assert_eq!(from.as_deref(), Some("./c"));
                assert_eq!(specifiers[0].local, "C");
            }
            other => panic!("Expected export list, got {:?}", other),
        }
        assert_eq!(items[2], Item::ExportAll("./d".to_string()));
        assert_eq!(decl(&items[3]).name, "E");
        assert!(items.iter().all(Item::is_export));
    }

    #[test]
    fn test_export_statements_versus_modifiers() {
        let items = scan("export function f(): void;\nexport { f };\nexport = f;");
        assert!(items[0].is_export());
        assert!(!items[0].is_export_statement());
        assert!(items[1].is_export_statement());
        assert!(items[2].is_export_statement());
    }

    #[test]
    fn test_export_default_forms() {
        let items = scan("export default function (x: number): string;\nexport default lib;");
        let d = decl(&items[0]);
        assert_eq!(d.name, "default");
        assert_eq!(d.ty.text, "(x: number) => string");
        assert!(matches!(&items[1], Item::ExportList { specifiers, .. } if specifiers[0].local == "lib"));
    }

    #[test]
    fn test_namespace_members() {
        let items = scan("declare namespace lib {\n  function f(): void;\n  interface O { a: string }\n}");
        let ns = decl(&items[0]);
        assert_eq!(ns.ty.kind, DeclarationKind::Namespace);
        assert!(!ns.exported);
        let members = ns.members.as_ref().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(decl(&members[0]).name, "f");
        assert_eq!(decl(&members[1]).name, "O");
    }

    #[test]
    fn test_ambient_module() {
        let items = scan("declare module 'left-pad' {\n  export function pad(s: string): string;\n}");
        match &items[0] {
            Item::AmbientModule { name, body } => {
                assert_eq!(name, "left-pad");
                assert_eq!(body.len(), 1);
                assert!(body[0].is_export());
            }
            other => panic!("Expected ambient module, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_block_is_an_error() {
        let tokens = tokenize("export interface A {\n a: string;\n").unwrap();
        let err = Scanner::new(&tokens).scan().unwrap_err();
        assert!(err.message.contains("unbalanced"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_stray_closer_is_an_error() {
        let tokens = tokenize("export const a: number;\n}").unwrap();
        let err = Scanner::new(&tokens).scan().unwrap_err();
        assert_eq!(err.line, 2);
    }
}
