//! Nested script execution for `)get`.
//!
//! Each file runs in its own parser over the session's shared configuration. The
//! file is a recovery boundary: a recoverable error stops that file, is reported
//! once, and control returns to the caller. Non-recoverable errors pass through.
use std::fs::File;
use std::io::BufReader;

use iv_lexer::Scanner;
use iv_syntax::{DiagnosticKind, Location, codes};

use crate::{Error, Line, Parser, Result, Session};

/// Run the script at `name`, reporting recoverable errors to the session's stderr.
///
/// `at` is where the request came from; it locates open failures.
pub fn run_file(session: &mut Session, name: &str, at: Option<Location>) -> Result<()> {
    let Some(lease) = session.guard().enter() else {
        let limit = session.guard().limit();
        tracing::debug!(file = name, limit, "nesting limit reached");
        return Err(
            Error::recoverable(DiagnosticKind::NestedTooDeep(name.to_string()), at)
                .with_code(codes::NESTED_TOO_DEEP),
        );
    };
    tracing::debug!(file = name, depth = lease.level(), "enter script");

    let result = drive(session, name, at);
    let outcome = match result {
        Ok(()) => Ok(()),
        Err(Error::Recoverable(diag)) => {
            tracing::debug!(file = name, error = %diag, "script stopped");
            session.report(&diag)?;
            Ok(())
        }
        Err(other) => Err(other),
    };

    tracing::debug!(file = name, depth = lease.level(), "leave script");
    drop(lease);
    outcome
}

fn drive(session: &mut Session, name: &str, at: Option<Location>) -> Result<()> {
    let file = File::open(name).map_err(|e| {
        Error::recoverable(
            DiagnosticKind::OpenFailed {
                path: name.to_string(),
                reason: e.to_string(),
            },
            at,
        )
        .with_code(codes::OPEN_FAILED)
    })?;
    let mut parser = Parser::new(session, Scanner::new(name, BufReader::new(file)));
    loop {
        match parser.line()? {
            Line::Value(v) => parser.session_mut().print_value(&v)?,
            Line::Empty => {}
            Line::Eof => return Ok(()),
        }
    }
}
