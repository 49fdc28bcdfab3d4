//! Rule trait and the metadata rules publish to the host

use padlint_core::{Diagnostic, MarkupModel, Severity};
use serde::Serialize;

/// A lint rule run once per parsed file
pub trait Rule: Send + Sync {
    /// Static description of the rule
    fn metadata(&self) -> &RuleMetadata;

    /// Check one file and return its diagnostics
    fn check(&self, model: &MarkupModel) -> Vec<Diagnostic>;

    fn id(&self) -> &'static str {
        self.metadata().id
    }
}

/// Metadata associated with a rule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    /// Unique identifier, `<category>/<name>`
    pub id: &'static str,
    /// Human-readable name for the rule
    pub name: &'static str,
    /// Detailed description of what the rule checks
    pub description: &'static str,
    /// Default severity level
    pub severity: Severity,
    pub category: RuleCategory,
    pub fixable: FixKind,
    /// Message templates the rule reports with
    pub messages: &'static [MessageTemplate],
    /// Whether the rule accepts any options
    pub has_options: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<&'static str>,
}

impl RuleMetadata {
    /// Template text for `message_id`
    pub fn message(&self, message_id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|m| m.id == message_id)
            .map(|m| m.text)
    }
}

/// A message identifier and its text.
///
/// Text may hold `{name}`-style placeholders filled in when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub id: &'static str,
    pub text: &'static str,
}

/// Categories for organizing rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCategory {
    /// Markup that is likely wrong
    Correctness,
    /// Naming and other preferences
    Style,
    /// Whitespace and line layout
    Layout,
    /// Custom category using a bespoke slug
    Custom(&'static str),
}

impl RuleCategory {
    /// Return the kebab-case slug used for IDs and filtering
    pub fn slug(&self) -> &'static str {
        match self {
            RuleCategory::Correctness => "correctness",
            RuleCategory::Style => "style",
            RuleCategory::Layout => "layout",
            RuleCategory::Custom(name) => name,
        }
    }
}

impl Serialize for RuleCategory {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.slug())
    }
}

/// What kind of fixes a rule offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixKind {
    None,
    /// Edits touch whitespace only
    Whitespace,
    Code,
}

impl FixKind {
    pub fn is_fixable(self) -> bool {
        self != FixKind::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FixKind::None => "none",
            FixKind::Whitespace => "whitespace",
            FixKind::Code => "code",
        }
    }
}

/// Fill `{key}` placeholders in a message template
pub fn format_message(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: &[MessageTemplate] = &[MessageTemplate {
        id: "tooLoud",
        text: "Element <{name}> is too loud",
    }];

    fn metadata() -> RuleMetadata {
        RuleMetadata {
            id: "style/quiet",
            name: "quiet",
            description: "Keeps things quiet",
            severity: Severity::Info,
            category: RuleCategory::Style,
            fixable: FixKind::None,
            messages: MESSAGES,
            has_options: false,
            docs_url: None,
        }
    }

    #[test]
    fn test_message_lookup_and_format() {
        let meta = metadata();
        let text = meta.message("tooLoud").expect("template");
        assert_eq!(
            format_message(text, &[("name", "Banner")]),
            "Element <Banner> is too loud"
        );
        assert!(meta.message("missing").is_none());
    }

    #[test]
    fn test_metadata_serializes_with_slugs() {
        let json = serde_json::to_value(metadata()).expect("serialize");
        assert_eq!(json["category"], "style");
        assert_eq!(json["fixable"], "none");
        assert_eq!(json["hasOptions"], false);
        assert_eq!(json["messages"][0]["id"], "tooLoud");
        assert!(json.get("docsUrl").is_none());
    }

    #[test]
    fn test_custom_category_slug() {
        assert_eq!(RuleCategory::Custom("a11y").slug(), "a11y");
        assert_eq!(RuleCategory::Layout.slug(), "layout");
    }
}
