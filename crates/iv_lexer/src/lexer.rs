//! Lexer implementation.
//!
//! Scans a chunk of input into tokens (identifiers/numbers/strings/operators) plus a
//! `Newline` token per line, and collects diagnostics.
//!
//! Design: single linear pass, no lookbehind. Malformed input produces an `Error`
//! token in place, so the parser only fails once it actually reaches the bad token;
//! lines before it still run.
//!
//! Related: `LexResult`, `Scanner`, `iv_syntax` (tokens/diagnostics).
use iv_syntax::{Diagnostic, DiagnosticKind, DiagnosticsFormatter, Span, Token, TokenKind};
use iv_syntax::{is_ident_continue, is_ident_start};

/// Two-character operators; every other punctuation char is an operator on its own.
static OPERATORS: phf::Set<&'static str> = phf::phf_set! {
    "**", "==", "!=", "<=", ">=", "<<", ">>", "&&", "||",
};

/// Lexing result.
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Line-oriented lexer.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    i: usize,
    diagnostics: Vec<Diagnostic>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            i: 0,
            diagnostics: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Run the lexer and return tokens + diagnostics. The token list always ends
    /// with `Eof`.
    pub fn lex(mut self) -> LexResult {
        let approx = self.bytes.len().saturating_div(3).max(8);
        self.tokens.reserve(approx);
        while self.i < self.bytes.len() {
            let start = self.i;
            let Some(c) = self.peek_char() else {
                break;
            };
            match c {
                '\r' if self.peek_str("\r\n") => {
                    self.i += 2;
                    self.push(TokenKind::Newline, start, self.i);
                }
                '\n' => {
                    self.i += 1;
                    self.push(TokenKind::Newline, start, self.i);
                }
                ' ' | '\t' | '\r' => {
                    self.i += 1;
                }
                '#' => {
                    while let Some(ch) = self.peek_char() {
                        if ch == '\n' || self.peek_str("\r\n") {
                            break;
                        }
                        self.i += ch.len_utf8();
                    }
                }
                '(' => {
                    self.i += 1;
                    self.push(TokenKind::LeftParen, start, self.i);
                }
                ')' => {
                    self.i += 1;
                    self.push(TokenKind::RightParen, start, self.i);
                }
                '"' | '\'' => self.lex_string(c),
                '`' => self.lex_raw_string(),
                '0'..='9' => self.lex_number(),
                '.' if self.peek_nth_is_digit(1) => self.lex_number(),
                c if is_ident_start(c) => self.lex_identifier(),
                c if c.is_ascii_punctuation() => {
                    let two = self.input.get(self.i..self.i + 2);
                    if two.is_some_and(|s| OPERATORS.contains(s)) {
                        self.i += 2;
                    } else {
                        self.i += 1;
                    }
                    self.push(TokenKind::Operator, start, self.i);
                }
                other => {
                    self.i += other.len_utf8();
                    self.error(DiagnosticKind::UnexpectedChar(other), start);
                }
            }
        }
        let end = self.bytes.len();
        self.push(TokenKind::Eof, end, end);
        LexResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let span = Span::new(start as u32, end as u32);
        self.tokens
            .push(Token::new(kind, span.slice(self.input), span));
    }

    /// Record a diagnostic and emit an `Error` token whose text is its message.
    fn error(&mut self, kind: DiagnosticKind, start: usize) {
        let message = DiagnosticsFormatter::format(&kind);
        self.tokens.push(Token::new(
            TokenKind::Error,
            message,
            Span::new(start as u32, self.i as u32),
        ));
        self.diagnostics.push(Diagnostic::new(kind, None));
    }

    fn lex_string(&mut self, quote: char) {
        let start = self.i;
        self.i += 1;
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            if ch == quote {
                self.i += 1;
                self.push(TokenKind::String, start, self.i);
                return;
            }
            if ch == '\\' {
                self.i += 1;
                match self.peek_char() {
                    Some('\n') | None => break,
                    Some(esc) => self.i += esc.len_utf8(),
                }
                continue;
            }
            self.i += ch.len_utf8();
        }
        self.error(DiagnosticKind::UnterminatedString, start);
    }

    fn lex_raw_string(&mut self) {
        let start = self.i;
        self.i += 1;
        while let Some(ch) = self.peek_char() {
            self.i += ch.len_utf8();
            if ch == '`' {
                self.push(TokenKind::RawString, start, self.i);
                return;
            }
        }
        self.error(DiagnosticKind::UnterminatedString, start);
    }

    /// Numbers are scanned loosely: any trailing identifier characters stay part of
    /// the token so that `12ab` is reported as one bad number rather than two tokens.
    fn lex_number(&mut self) {
        let start = self.i;
        if self.peek_str("0x") || self.peek_str("0X") {
            self.i += 2;
        } else {
            self.eat_digits();
            if self.peek_char() == Some('.') {
                self.i += 1;
                self.eat_digits();
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                self.i += 1;
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.i += 1;
                }
            }
        }
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.i += ch.len_utf8();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, self.i);
    }

    fn lex_identifier(&mut self) {
        let start = self.i;
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.i += ch.len_utf8();
            } else {
                break;
            }
        }
        self.push(TokenKind::Identifier, start, self.i);
    }

    fn eat_digits(&mut self) {
        while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
            self.i += 1;
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.i..].chars().next()
    }

    fn peek_nth_is_digit(&self, n: usize) -> bool {
        self.bytes.get(self.i + n).is_some_and(|b| b.is_ascii_digit())
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.i..].starts_with(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).lex().tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn directive_line() {
        use TokenKind::*;
        assert_eq!(
            kinds(")format \"%.3f\"\n"),
            vec![RightParen, Identifier, String, Newline, Eof]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        use TokenKind::*;
        assert_eq!(kinds("1 2 # three\n4"), vec![Number, Number, Newline, Number, Eof]);
    }

    #[test]
    fn two_char_operators() {
        let lex = Lexer::new("a<=b**2").lex();
        let ops: Vec<&str> = lex
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ops, vec!["<=", "**"]);
    }

    #[test]
    fn number_swallows_trailing_letters() {
        let lex = Lexer::new("12ab 1.5e3 0x1F .5").lex();
        let nums: Vec<&str> = lex.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(nums, vec!["12ab", "1.5e3", "0x1F", ".5", ""]);
    }

    #[test]
    fn unterminated_string_becomes_error_token() {
        let lex = Lexer::new("\"abc\n1").lex();
        assert_eq!(lex.tokens[0].kind, TokenKind::Error);
        assert_eq!(lex.tokens[0].text, "unterminated string");
        assert_eq!(lex.diagnostics.len(), 1);
        assert_eq!(lex.tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn crlf_is_one_newline() {
        use TokenKind::*;
        assert_eq!(kinds("1\r\n2\r\n"), vec![Number, Newline, Number, Newline, Eof]);
    }
}
