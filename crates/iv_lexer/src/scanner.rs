//! Lazily scanned token stream.
//!
//! `Scanner` pulls one line at a time from a `BufRead`, lexes it and hands the tokens
//! out through [`TokenStream`]. Interactive input and script files go through the same
//! path; nothing past the current line is read until the parser asks for it.
use std::collections::VecDeque;
use std::io::BufRead;
use std::rc::Rc;

use iv_syntax::{DiagnosticKind, DiagnosticsFormatter, Location, Span, Token, TokenKind};

use crate::Lexer;

/// Lookahead/consume access to tokens, with the location of the current line.
pub trait TokenStream {
    /// Consume and return the next token. Returns `Eof` forever once input ends.
    fn next(&mut self) -> Token;
    /// Look at the next token without consuming it.
    fn peek(&mut self) -> &Token;
    /// Location of the line the stream is positioned in.
    fn location(&self) -> Location;
}

pub struct Scanner<R> {
    name: Rc<str>,
    reader: R,
    line: u32,
    buf: String,
    pending: VecDeque<Token>,
    eof: Token,
    done: bool,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(name: impl Into<Rc<str>>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            line: 0,
            buf: String::new(),
            pending: VecDeque::new(),
            eof: Token::eof(),
            done: false,
        }
    }

    /// Refill `pending` with the tokens of the next line. Leaves it empty only at
    /// end of input.
    fn fill(&mut self) {
        while self.pending.is_empty() && !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                }
                Ok(_) => {
                    self.line += 1;
                    let lexed = Lexer::new(&self.buf).lex();
                    // The parser reports these through the error tokens they produce.
                    for diag in &lexed.diagnostics {
                        tracing::trace!(file = %self.name, line = self.line, "{diag}");
                    }
                    let mut saw_newline = false;
                    for tok in lexed.tokens {
                        match tok.kind {
                            TokenKind::Eof => {}
                            TokenKind::Newline => {
                                saw_newline = true;
                                self.pending.push_back(tok);
                            }
                            _ => self.pending.push_back(tok),
                        }
                    }
                    if !saw_newline {
                        let end = self.buf.len() as u32;
                        self.pending
                            .push_back(Token::new(TokenKind::Newline, "", Span::new(end, end)));
                    }
                    tracing::trace!(
                        file = %self.name,
                        line = self.line,
                        tokens = self.pending.len(),
                        "scanned line"
                    );
                }
                Err(e) => {
                    self.line += 1;
                    self.done = true;
                    tracing::debug!(file = %self.name, error = %e, "read failed");
                    let message = DiagnosticsFormatter::format(&DiagnosticKind::ReadFailed(
                        e.to_string(),
                    ));
                    self.pending
                        .push_back(Token::new(TokenKind::Error, message, Span::default()));
                    self.pending
                        .push_back(Token::new(TokenKind::Newline, "", Span::default()));
                }
            }
        }
    }
}

impl<R: BufRead> TokenStream for Scanner<R> {
    fn next(&mut self) -> Token {
        self.fill();
        self.pending.pop_front().unwrap_or_else(|| self.eof.clone())
    }

    fn peek(&mut self) -> &Token {
        self.fill();
        self.pending.front().unwrap_or(&self.eof)
    }

    fn location(&self) -> Location {
        Location {
            file: self.name.clone(),
            line: self.line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn scanner(src: &str) -> Scanner<Cursor<Vec<u8>>> {
        Scanner::new("test.iv", Cursor::new(src.as_bytes().to_vec()))
    }

    #[test]
    fn location_tracks_current_line() {
        let mut s = scanner("1\n)origin\n");
        assert_eq!(s.next().text, "1");
        assert_eq!(s.location().to_string(), "test.iv:1");
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.peek().kind, TokenKind::RightParen);
        assert_eq!(s.location().to_string(), "test.iv:2");
    }

    #[test]
    fn missing_final_newline_is_synthesized() {
        let mut s = scanner("7");
        assert_eq!(s.next().kind, TokenKind::Number);
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.next().kind, TokenKind::Eof);
        assert_eq!(s.next().kind, TokenKind::Eof);
    }

    #[test]
    fn blank_lines_yield_newlines() {
        let mut s = scanner("\n\n");
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.next().kind, TokenKind::Eof);
        assert_eq!(s.location().line, 2);
    }

    #[test]
    fn lex_errors_stay_on_their_line() {
        let mut s = scanner("'open\n5\n");
        let tok = s.next();
        assert_eq!(tok.kind, TokenKind::Error);
        assert_eq!(tok.text, "unterminated string");
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.next().text, "5");
        assert_eq!(s.location().to_string(), "test.iv:2");
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_error_becomes_error_token() {
        let mut s = Scanner::new("bad", BufReader::new(Failing));
        let tok = s.next();
        assert_eq!(tok.kind, TokenKind::Error);
        assert!(tok.text.contains("disk on fire"), "{}", tok.text);
        assert_eq!(s.next().kind, TokenKind::Newline);
        assert_eq!(s.next().kind, TokenKind::Eof);
    }
}
