//! Parser.
//!
//! Drives a token stream one line at a time. A line starting with `)` is a special
//! directive (see `special.rs`); anything else is handed to the expression
//! evaluator. All parsers in a session share its configuration, so a nested parser
//! built for `)get` sees and changes the same settings as its parent.
use iv_core::{Config, Value};
use iv_lexer::TokenStream;
use iv_syntax::{DiagnosticKind, Location, Token, TokenKind, unquote};

use crate::{Error, Result, Session};

/// Outcome of one top-level line.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// The line computed a value to print.
    Value(Value),
    /// Blank line or directive; nothing to print.
    Empty,
    /// End of input.
    Eof,
}

pub struct Parser<'s> {
    session: &'s mut Session,
    tokens: Box<dyn TokenStream + 's>,
    at_line_start: bool,
    pub(crate) expr_depth: usize,
}

impl<'s> Parser<'s> {
    /// Create a new parser reading `tokens` within `session`.
    pub fn new(session: &'s mut Session, tokens: impl TokenStream + 's) -> Self {
        Self {
            session,
            tokens: Box::new(tokens),
            at_line_start: true,
            expr_depth: 0,
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.session
    }

    pub fn config(&self) -> &Config {
        self.session.config()
    }

    pub fn config_mut(&mut self) -> &mut Config {
        self.session.config_mut()
    }

    pub fn location(&self) -> Location {
        self.tokens.location()
    }

    /// Parse and evaluate the next line.
    pub fn line(&mut self) -> Result<Line> {
        match self.peek_kind() {
            TokenKind::Eof => Ok(Line::Eof),
            TokenKind::Newline => {
                self.next()?;
                Ok(Line::Empty)
            }
            TokenKind::RightParen => {
                self.next()?;
                self.special()?;
                Ok(Line::Empty)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.need(&[TokenKind::Newline])?;
                if self.config().debug("parse") {
                    self.println(&expr.to_string())?;
                }
                Ok(Line::Value(self.eval(&expr)?))
            }
        }
    }

    /// Skip the remainder of the current line, if any of it is left.
    pub fn flush_to_newline(&mut self) {
        if self.at_line_start {
            return;
        }
        loop {
            let tok = self.tokens.next();
            if matches!(tok.kind, TokenKind::Newline | TokenKind::Eof) {
                break;
            }
        }
        self.at_line_start = true;
    }

    pub(crate) fn next(&mut self) -> Result<Token> {
        let tok = self.tokens.next();
        self.at_line_start = matches!(tok.kind, TokenKind::Newline | TokenKind::Eof);
        if self.config().debug("tokens") {
            let loc = self.location();
            self.println(&format!("{loc}: {tok}"))?;
        }
        if tok.kind == TokenKind::Error {
            return Err(self.error(DiagnosticKind::Raw(tok.text)));
        }
        Ok(tok)
    }

    pub(crate) fn peek(&mut self) -> &Token {
        self.tokens.peek()
    }

    pub(crate) fn peek_kind(&mut self) -> TokenKind {
        self.tokens.peek().kind
    }

    /// Consume the next token, which must be one of `want`.
    pub(crate) fn need(&mut self, want: &[TokenKind]) -> Result<Token> {
        let tok = self.next()?;
        if want.contains(&tok.kind) {
            return Ok(tok);
        }
        let expected = want
            .iter()
            .map(|k| k.describe())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(self.error(DiagnosticKind::ExpectedToken {
            expected,
            found: tok.to_string(),
        }))
    }

    /// The string or raw string that must come next, unquoted.
    pub(crate) fn get_string(&mut self) -> Result<String> {
        let tok = self.need(&[TokenKind::String, TokenKind::RawString])?;
        unquote(&tok.text).map_err(|e| self.error(DiagnosticKind::InvalidString(e.to_string())))
    }

    /// A recoverable error at the current location.
    pub(crate) fn error(&self, kind: DiagnosticKind) -> Error {
        Error::recoverable(kind, Some(self.location()))
    }

    pub(crate) fn println(&mut self, s: &str) -> Result<()> {
        self.session.stdout().line(s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iv_lexer::Scanner;
    use std::io::Cursor;

    fn parse_lines(src: &str) -> (Vec<Line>, Session) {
        let mut session = Session::captured(Config::new());
        let mut lines = Vec::new();
        {
            let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new(src.to_string())));
            loop {
                let line = p.line().unwrap();
                if line == Line::Eof {
                    break;
                }
                lines.push(line);
            }
        }
        (lines, session)
    }

    #[test]
    fn lines_classify() {
        let (lines, _) = parse_lines("\n)origin 0\n3\n");
        assert_eq!(lines, vec![Line::Empty, Line::Empty, Line::Value(Value::Int(3))]);
    }

    #[test]
    fn need_reports_expected_and_found() {
        let mut session = Session::captured(Config::new());
        let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new(")format 3\n")));
        let err = p.line().unwrap_err();
        assert_eq!(err.to_string(), "t:1: expected string or raw string, got number: \"3\"");
    }

    #[test]
    fn flush_skips_only_the_rest_of_the_line() {
        let mut session = Session::captured(Config::new());
        let mut p = Parser::new(
            &mut session,
            Scanner::new("t", Cursor::new(")origin 0 extra stuff\n5\n")),
        );
        assert!(p.line().unwrap_err().is_recoverable());
        p.flush_to_newline();
        assert_eq!(p.line().unwrap(), Line::Value(Value::Int(5)));
    }

    #[test]
    fn flush_after_complete_line_is_a_no_op() {
        let mut session = Session::captured(Config::new());
        let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new("iota \"x\"\n7\n")));
        assert!(p.line().unwrap_err().is_recoverable());
        p.flush_to_newline();
        assert_eq!(p.line().unwrap(), Line::Value(Value::Int(7)));
    }

    #[test]
    fn error_tokens_surface_when_reached() {
        let mut session = Session::captured(Config::new());
        let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new("1\n\"open\n")));
        assert_eq!(p.line().unwrap(), Line::Value(Value::Int(1)));
        let err = p.line().unwrap_err();
        assert_eq!(err.to_string(), "t:2: unterminated string");
    }

    #[test]
    fn tokens_flag_echoes_tokens() {
        let (_, mut session) = parse_lines(")debug tokens 1\n42\n");
        // Values are printed by the caller, so only the echoed tokens show up here.
        assert_eq!(
            session.take_stdout(),
            "t:2: number: \"42\"\nt:2: newline\n"
        );
    }
}
