//! Built-in rules

use std::sync::Arc;

use crate::rule::Rule;

pub mod padding;

pub use padding::MultilineJsxPadding;

/// Collection of the rules shipped with padlint
pub struct BuiltinRules;

impl BuiltinRules {
    /// Every built-in rule, in registration order
    pub fn all() -> Vec<Arc<dyn Rule>> {
        vec![Arc::new(MultilineJsxPadding::new())]
    }

    /// Ids of the built-in rules
    pub fn ids() -> Vec<&'static str> {
        Self::all().iter().map(|rule| rule.id()).collect()
    }
}
