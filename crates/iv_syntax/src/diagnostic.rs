//! Diagnostics: a message, where it happened and optional code/help.

use std::fmt;

use crate::{DiagnosticKind, DiagnosticsFormatter, Location};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub code: Option<&'static str>,
    pub location: Option<Location>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Option<Location>) -> Self {
        Self {
            message: DiagnosticsFormatter::format(&kind),
            code: None,
            location,
            help: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// `<location>: <message>`, or the bare message when no location is known.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{}: {}", loc, self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub mod codes {
    pub const UNKNOWN_DIRECTIVE: &str = "E0001";
    pub const ILLEGAL_ORIGIN: &str = "E0002";
    pub const NESTED_TOO_DEEP: &str = "E0003";
    pub const OPEN_FAILED: &str = "E0004";
}
