//! iv_parser: line driver, special directives and nested script execution.
//!
//! A [`Session`] runs input one line at a time through a [`Parser`]. Lines that
//! start with `)` are directives that read or change the session [`iv_core::Config`];
//! `)get` runs another file through a nested parser over the same session.
mod error;
mod exec;
mod expr;
mod guard;
mod output;
mod parser;
mod session;
mod special;

pub use error::{Error, Result};
pub use exec::run_file;
pub use expr::{Expr, MAX_EXPR_DEPTH, MAX_IOTA, UnaryOp};
pub use guard::{DepthLease, MAX_DEPTH, RecursionGuard};
pub use output::Output;
pub use parser::{Line, Parser};
pub use session::Session;
pub use special::{Directive, directive_names};
