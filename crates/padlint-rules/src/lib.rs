//! padlint Rules
//!
//! Rule host and built-in rules for padlint.
//! This crate provides the `Rule` trait, the registry and engine that run
//! configured rules over parsed files, and the shipped rule set.

pub mod builtin;
pub mod engine;
pub mod rule;

// Re-export commonly used types
pub use builtin::BuiltinRules;
pub use engine::{RuleEngine, RuleRegistry};
pub use rule::{FixKind, MessageTemplate, Rule, RuleCategory, RuleMetadata, format_message};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
