//! Token definitions.
//!
//! Defines the tokens seen by the line driver and the directive parser: literals,
//! identifiers, operators, parentheses and the layout tokens (newline/EOF).
use std::fmt;

use crate::Span;

/// Token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of a line of input.
    Newline,
    /// End of input.
    Eof,
    /// Malformed input; the token text holds the message.
    Error,

    /// Identifier.
    Identifier,
    /// Numeric literal (decimal, fraction, exponent or `0x` hex).
    Number,
    /// Quoted string literal, `"..."` or `'...'`.
    String,
    /// Raw string literal, `` `...` ``.
    RawString,

    /// `(`
    LeftParen,
    /// `)`; at the start of a line it introduces a special directive.
    RightParen,
    /// Any other punctuation, e.g. `+`, `?`, `<=`.
    Operator,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "error",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::RawString => "raw string",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Operator => "operator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Literal text as written (quotes included for strings).
    pub text: String,
    /// Span within the scanned line.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "", Span::default())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline | TokenKind::Eof => f.write_str(self.kind.describe()),
            TokenKind::Error => f.write_str(&self.text),
            _ => write!(f, "{}: {:?}", self.kind, self.text),
        }
    }
}
