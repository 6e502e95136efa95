//! iv_syntax: shared syntax types.
//!
//! Tokens, spans, source locations, diagnostics and literal unquoting used by the
//! lexer, the directive parser and the CLI.
mod diagnostic;
mod kind;
mod loc;
mod render;
mod span;
mod str_util;
mod token;
mod util;

pub use diagnostic::{Diagnostic, codes};
pub use kind::{DiagnosticKind, DiagnosticsFormatter};
pub use loc::Location;
pub use render::{RenderOptions, render_diagnostic_with_options};
pub use span::Span;
pub use str_util::{UnquoteError, quote, unquote};
pub use token::{Token, TokenKind};
pub use util::{find_best_match, is_ident_continue, is_ident_start, levenshtein_distance};
