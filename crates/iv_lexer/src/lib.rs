//! iv_lexer: lexer crate.
//!
//! Tokenizes input text and exposes it to the parser as a lazily scanned
//! [`TokenStream`].
//! Entry points: `Lexer::new(input).lex()` and `Scanner::new(name, reader)`.
mod lexer;
mod scanner;

pub use lexer::{LexResult, Lexer};
pub use scanner::{Scanner, TokenStream};
