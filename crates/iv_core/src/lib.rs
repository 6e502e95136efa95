//! Core types for the iv interpreter.
//!
//! This crate contains the state shared by every parser in a session:
//! - `Config` - debug flags, number format, origin, prompt and the seeded generator
//! - `ConfigFile` - startup settings loaded from TOML
//! - `Value` - literal values produced by the line evaluator

pub mod config;
pub mod format;
pub mod value;

pub use config::{Config, ConfigError, ConfigFile, DEBUG_FLAGS};
pub use format::NumberFormat;
pub use value::{Value, ValueError};
