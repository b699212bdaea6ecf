//! Canonical spacing for type text
//!
//! Two declarations that differ only in whitespace, comments, quote style or
//! trailing separators render to the same string.

use super::lexer::Token;

/// Render tokens with canonical spacing.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;

    for (i, tok) in tokens.iter().enumerate() {
        // Leading union/intersection operator: `= | "a" | "b"`
        if prev.is_none() && (tok.is("|") || tok.is("&")) {
            continue;
        }
        // Trailing separators before a closer or at the end
        if (tok.is(";") || tok.is(","))
            && tokens
                .get(i + 1)
                .map_or(true, |next| next.is("}") || next.is("]") || next.is(")"))
        {
            continue;
        }
        if let Some(p) = prev {
            if needs_space(p, tok) {
                out.push(' ');
            }
        }
        out.push_str(&tok.text);
        prev = Some(tok);
    }

    out
}

/// Render a brace-delimited body.
pub fn render_block(body: &[Token]) -> String {
    let inner = render(body);
    if inner.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", inner)
    }
}

fn needs_space(prev: &Token, cur: &Token) -> bool {
    let p = prev.text.as_str();
    let c = cur.text.as_str();

    if matches!(p, "(" | "[" | "<" | "." | "..." | "@") {
        return false;
    }
    if p == "{" && c == "}" {
        return false;
    }
    if matches!(c, ")" | "]" | "," | ";" | ":" | "." | "?" | "!" | ">") {
        return false;
    }
    if matches!(c, "=>" | "|" | "&" | "=") || matches!(p, "=>" | "|" | "&" | "=") {
        return true;
    }
    if matches!(p, "," | ";" | ":" | "{") {
        return true;
    }
    if c == "}" || c == "{" {
        return true;
    }
    if matches!(c, "(" | "[") {
        return !(prev.is_word() || matches!(p, ")" | "]" | ">"));
    }
    if c == "<" {
        return false;
    }
    if matches!(p, ">" | ")" | "]") {
        return cur.is_word();
    }
    prev.is_word() && cur.is_word()
}
