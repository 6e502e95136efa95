//! Error taxonomy.
//!
//! `Recoverable` errors abort the current line, directive or nested file and are
//! turned into a one-line report by the nearest boundary. Everything else is
//! non-recoverable and always propagates to the caller.

use iv_syntax::{Diagnostic, DiagnosticKind, Location};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Recoverable(Diagnostic),
    #[error("{0}")]
    Fatal(String),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn recoverable(kind: DiagnosticKind, location: Option<Location>) -> Self {
        Error::Recoverable(Diagnostic::new(kind, location))
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Recoverable(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Recoverable(d) => Some(d),
            _ => None,
        }
    }

    pub(crate) fn with_code(self, code: &'static str) -> Self {
        match self {
            Error::Recoverable(d) => Error::Recoverable(d.with_code(code)),
            other => other,
        }
    }

    pub(crate) fn with_help(self, help: impl Into<String>) -> Self {
        match self {
            Error::Recoverable(d) => Error::Recoverable(d.with_help(help)),
            other => other,
        }
    }
}
