//! Special directives.
//!
//! A line starting with `)` names a directive:
//!
//! ```text
//! )debug [flag [number]]    list flags, or toggle/set one
//! )format ["fmt"]           show or set the number format
//! )get "file"               run a file in a nested parser
//! )origin [0|1]             show or set the index origin
//! )prompt ["text"]          set the prompt
//! )seed [n]                 reseed the random generator
//! ```
//!
//! Each handler only parses its arguments into a [`Directive`]. The directive is
//! applied after the terminating newline has been read, so a line that fails to
//! parse never touches the configuration.
use iv_core::{ConfigError, Value};
use iv_syntax::{DiagnosticKind, TokenKind, codes, find_best_match, quote};

use crate::exec;
use crate::{Error, Parser, Result};

/// One parsed directive line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Print these lines.
    Show(Vec<String>),
    SetDebug { name: String, on: bool, echo: bool },
    SetFormat(String),
    Get(String),
    SetOrigin(i64),
    SetPrompt(String),
    Seed(i64),
}

type Handler = fn(&mut Parser<'_>) -> Result<Directive>;

static DIRECTIVES: phf::Map<&'static str, Handler> = phf::phf_map! {
    "debug" => debug as Handler,
    "format" => format as Handler,
    "get" => get as Handler,
    "origin" => origin as Handler,
    "prompt" => prompt as Handler,
    "seed" => seed as Handler,
};

/// Names of all registered directives, sorted.
pub fn directive_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DIRECTIVES.keys().copied().collect();
    names.sort_unstable();
    names
}

impl Parser<'_> {
    /// Handle a directive line; the leading `)` has been consumed.
    pub(crate) fn special(&mut self) -> Result<()> {
        let name = self.need(&[TokenKind::Identifier])?.text;
        tracing::trace!(directive = %name, at = %self.location(), "special");
        let Some(handler) = DIRECTIVES.get(name.as_str()) else {
            let mut err = self
                .error(DiagnosticKind::UnknownDirective(name.clone()))
                .with_code(codes::UNKNOWN_DIRECTIVE);
            if let Some(close) = find_best_match(&name, DIRECTIVES.keys().copied()) {
                err = err.with_help(format!("did you mean ){close}?"));
            }
            return Err(err);
        };
        let directive = handler(self)?;
        self.need(&[TokenKind::Newline])?;
        self.apply(directive)
    }

    fn apply(&mut self, directive: Directive) -> Result<()> {
        match directive {
            Directive::Show(lines) => {
                for line in lines {
                    self.println(&line)?;
                }
            }
            Directive::SetDebug { name, on, echo } => {
                self.config_mut()
                    .set_debug(&name, on)
                    .map_err(|e| self.config_error(e))?;
                if echo {
                    self.println(if on { "1" } else { "0" })?;
                }
            }
            Directive::SetFormat(format) => self.config_mut().set_format(format),
            Directive::Get(path) => {
                let at = self.location();
                exec::run_file(self.session_mut(), &path, Some(at))?;
            }
            Directive::SetOrigin(origin) => {
                self.config_mut()
                    .set_origin(origin)
                    .map_err(|e| self.config_error(e))?;
            }
            Directive::SetPrompt(prompt) => self.config_mut().set_prompt(prompt),
            Directive::Seed(seed) => self.config_mut().random_seed(seed),
        }
        Ok(())
    }

    /// A decimal integer argument.
    fn need_int(&mut self) -> Result<i64> {
        let tok = self.need(&[TokenKind::Number])?;
        if !tok.text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error(DiagnosticKind::InvalidInteger(tok.text)));
        }
        tok.text
            .parse::<i64>()
            .map_err(|_| self.error(DiagnosticKind::InvalidInteger(tok.text.clone())))
    }

    fn config_error(&self, e: ConfigError) -> Error {
        match e {
            ConfigError::IllegalOrigin(_) => self
                .error(DiagnosticKind::IllegalOrigin)
                .with_code(codes::ILLEGAL_ORIGIN),
            other => self.error(DiagnosticKind::Raw(other.to_string())),
        }
    }
}

fn debug(p: &mut Parser<'_>) -> Result<Directive> {
    if p.peek_kind() == TokenKind::Newline {
        return Ok(Directive::Show(
            p.config().debug_flags().map(str::to_string).collect(),
        ));
    }
    let name = p.need(&[TokenKind::Identifier])?.text;
    if !p.config().is_debug_flag(&name) {
        return Ok(Directive::Show(vec![format!("no such debug flag: {name}")]));
    }
    if p.peek_kind() != TokenKind::Number {
        let on = !p.config().debug(&name);
        return Ok(Directive::SetDebug {
            name,
            on,
            echo: true,
        });
    }
    let tok = p.next()?;
    let value = Value::parse_number(&tok.text)
        .map_err(|e| p.error(DiagnosticKind::InvalidNumber(e.to_string())))?;
    // Only an integer can switch a flag on; 1.0 or 0.5 switch it off.
    let on = matches!(value, Value::Int(_)) && value.to_bool();
    Ok(Directive::SetDebug {
        name,
        on,
        echo: false,
    })
}

fn format(p: &mut Parser<'_>) -> Result<Directive> {
    if p.peek_kind() == TokenKind::Newline {
        return Ok(Directive::Show(vec![quote(p.config().format())]));
    }
    Ok(Directive::SetFormat(p.get_string()?))
}

fn get(p: &mut Parser<'_>) -> Result<Directive> {
    Ok(Directive::Get(p.get_string()?))
}

fn origin(p: &mut Parser<'_>) -> Result<Directive> {
    if p.peek_kind() != TokenKind::Number {
        return Ok(Directive::Show(vec![p.config().origin().to_string()]));
    }
    let origin = p.need_int()?;
    if origin != 0 && origin != 1 {
        return Err(p
            .error(DiagnosticKind::IllegalOrigin)
            .with_code(codes::ILLEGAL_ORIGIN));
    }
    Ok(Directive::SetOrigin(origin))
}

fn prompt(p: &mut Parser<'_>) -> Result<Directive> {
    if p.peek_kind() == TokenKind::Newline {
        // Shows the format string, not the prompt; existing scripts rely on it.
        return Ok(Directive::Show(vec![quote(p.config().format())]));
    }
    Ok(Directive::SetPrompt(p.get_string()?))
}

fn seed(p: &mut Parser<'_>) -> Result<Directive> {
    if p.peek_kind() != TokenKind::Number {
        // Shows the origin, not the seed; existing scripts rely on it.
        return Ok(Directive::Show(vec![p.config().origin().to_string()]));
    }
    Ok(Directive::Seed(p.need_int()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Line, Session};
    use iv_core::Config;
    use iv_lexer::Scanner;
    use std::io::Cursor;

    /// Parse a single directive line without applying it.
    fn parse_directive(src: &str) -> Result<Directive> {
        let mut session = Session::captured(Config::new());
        let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new(src.to_string())));
        let _marker = p.need(&[TokenKind::RightParen])?;
        let name = p.need(&[TokenKind::Identifier])?.text;
        let handler = DIRECTIVES.get(name.as_str()).expect("registered");
        handler(&mut p)
    }

    fn run(src: &str) -> (Result<Line>, Session) {
        let mut session = Session::captured(Config::new());
        let res = {
            let mut p = Parser::new(&mut session, Scanner::new("t", Cursor::new(src.to_string())));
            p.line()
        };
        (res, session)
    }

    #[test]
    fn registry_lists_every_directive() {
        assert_eq!(
            directive_names(),
            vec!["debug", "format", "get", "origin", "prompt", "seed"]
        );
    }

    #[test]
    fn handlers_parse_arguments() {
        assert_eq!(
            parse_directive(")format `%.2f`").unwrap(),
            Directive::SetFormat("%.2f".into())
        );
        assert_eq!(parse_directive(")origin 0").unwrap(), Directive::SetOrigin(0));
        assert_eq!(parse_directive(")seed 17").unwrap(), Directive::Seed(17));
        assert_eq!(
            parse_directive(")get \"lib.iv\"").unwrap(),
            Directive::Get("lib.iv".into())
        );
        assert_eq!(
            parse_directive(")prompt '> '").unwrap(),
            Directive::SetPrompt("> ".into())
        );
    }

    #[test]
    fn debug_number_argument() {
        let on = |src| match parse_directive(src).unwrap() {
            Directive::SetDebug { on, echo, .. } => {
                assert!(!echo);
                on
            }
            other => panic!("{other:?}"),
        };
        assert!(on(")debug types 1"));
        assert!(on(")debug types 7"));
        assert!(!on(")debug types 0"));
        assert!(!on(")debug types 1.0"));
        assert!(!on(")debug types 0.5"));
    }

    #[test]
    fn bad_debug_number_is_an_error() {
        let err = parse_directive(")debug types 12ab").unwrap_err();
        assert_eq!(err.to_string(), "t:1: bad number syntax: 12ab");
    }

    #[test]
    fn unknown_directive_carries_help() {
        let (res, _) = run(")formt\n");
        let err = res.unwrap_err();
        assert_eq!(err.to_string(), "t:1: formt: not recognized");
        let diag = err.diagnostic().unwrap();
        assert_eq!(diag.help.as_deref(), Some("did you mean )format?"));
        assert_eq!(diag.code, Some(codes::UNKNOWN_DIRECTIVE));
    }

    #[test]
    fn origin_must_be_decimal() {
        let (res, session) = run(")origin 0x1\n");
        assert_eq!(res.unwrap_err().to_string(), "t:1: invalid integer \"0x1\"");
        assert_eq!(session.config().origin(), 1);
    }

    #[test]
    fn missing_newline_rejects_the_whole_directive() {
        let (res, session) = run(")format \"%d\" \"%x\"\n");
        assert!(res.unwrap_err().is_recoverable());
        assert_eq!(session.config().format(), "");

        let (res, session) = run(")seed 5 5\n");
        assert!(res.is_err());
        assert_eq!(session.config().seed(), 0);
    }

    #[test]
    fn negative_origin_is_not_a_number_argument() {
        // `-` is an operator, so this reads as a query followed by junk.
        let (res, mut session) = run(")origin -1\n");
        assert_eq!(
            res.unwrap_err().to_string(),
            "t:1: expected newline, got operator: \"-\""
        );
        assert_eq!(session.take_stdout(), "");
    }

    #[test]
    fn bad_string_escape() {
        let (res, _) = run(")format \"\\q\"\n");
        assert_eq!(
            res.unwrap_err().to_string(),
            "t:1: bad string literal: invalid escape \\q"
        );
    }
}
