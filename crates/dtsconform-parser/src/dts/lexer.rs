//! Tokenizer for declaration text

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Str,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    /// A line break separates this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    pub fn is_word(&self) -> bool {
        self.kind != TokenKind::Punct
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

/// Split declaration text into tokens, dropping comments.
///
/// Single-quoted strings are rewritten with double quotes so that `'a'` and
/// `"a"` render identically.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line = 1;
    let mut newline_before = false;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            newline_before = true;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Comments
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start_line = line;
            i += 2;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(LexError {
                            line: start_line,
                            message: "unterminated block comment".to_string(),
                        })
                    }
                    Some('*') if chars.get(i + 1) == Some(&'/') => {
                        i += 2;
                        break;
                    }
                    Some('\n') => {
                        line += 1;
                        newline_before = true;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            continue;
        }

        let start = i;
        let start_line = line;
        let (kind, text) = if c == '"' || c == '\'' || c == '`' {
            i += 1;
            let mut body = String::new();
            loop {
                match chars.get(i) {
                    None => {
                        return Err(LexError {
                            line: start_line,
                            message: "unterminated string literal".to_string(),
                        })
                    }
                    Some('\\') => {
                        body.push('\\');
                        if let Some(&escaped) = chars.get(i + 1) {
                            body.push(escaped);
                        }
                        i += 2;
                    }
                    Some(&q) if q == c => {
                        i += 1;
                        break;
                    }
                    Some(&other) => {
                        if other == '\n' {
                            if c != '`' {
                                return Err(LexError {
                                    line: start_line,
                                    message: "line break in string literal".to_string(),
                                });
                            }
                            line += 1;
                        }
                        body.push(other);
                        i += 1;
                    }
                }
            }
            let quote = if c == '\'' && !body.contains('"') { '"' } else { c };
            (TokenKind::Str, format!("{quote}{body}{quote}"))
        } else if is_ident_start(c) {
            while i < chars.len() && is_ident_continue(chars[i]) {
                i += 1;
            }
            (TokenKind::Ident, chars[start..i].iter().collect())
        } else if c.is_ascii_digit() {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_') {
                i += 1;
            }
            (TokenKind::Number, chars[start..i].iter().collect())
        } else if c == '=' && chars.get(i + 1) == Some(&'>') {
            i += 2;
            (TokenKind::Punct, "=>".to_string())
        } else if c == '.' && chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') {
            i += 3;
            (TokenKind::Punct, "...".to_string())
        } else {
            i += 1;
            (TokenKind::Punct, c.to_string())
        };

        tokens.push(Token {
            kind,
            text,
            line: start_line,
            newline_before,
        });
        newline_before = false;
    }

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$' || c == '#'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
