//! Configuration types for padlint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{PadlintError, Result, Severity};

/// Root of a configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PadlintConfiguration {
    /// Editor schema hint, ignored by the linter
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linter: Option<LinterConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfiguration>,
}

/// Linter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinterConfiguration {
    /// Enable/disable linter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Per-rule settings keyed by rule id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<BTreeMap<String, RuleSetting>>,
}

/// Files configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilesConfiguration {
    /// Glob patterns to include
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Glob patterns to exclude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl Default for FilesConfiguration {
    fn default() -> Self {
        Self {
            include: Some(vec!["**/*.jsx".to_string(), "**/*.tsx".to_string()]),
            exclude: Some(vec!["**/node_modules/**".to_string()]),
        }
    }
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Informational message
    Info,
    /// Warning (doesn't fail the run)
    #[serde(alias = "warning")]
    Warn,
    /// Error (fails the run)
    Error,
}

impl RuleSeverity {
    /// Diagnostic severity, `None` when the rule is off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }
}

/// Rule-specific configuration with options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleConfig {
    /// Rule severity override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<RuleSeverity>,

    /// Rule-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// A rule entry: either a bare severity or a full [`RuleConfig`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleSetting {
    Severity(RuleSeverity),
    Config(RuleConfig),
}

impl RuleSetting {
    pub fn severity(&self) -> Option<RuleSeverity> {
        match self {
            RuleSetting::Severity(severity) => Some(*severity),
            RuleSetting::Config(config) => config.severity,
        }
    }

    /// Options that carry content; `null`, `{}` and `[]` count as absent
    pub fn options(&self) -> Option<&serde_json::Value> {
        let RuleSetting::Config(config) = self else {
            return None;
        };
        config.options.as_ref().filter(|value| match value {
            serde_json::Value::Null => false,
            serde_json::Value::Object(map) => !map.is_empty(),
            serde_json::Value::Array(items) => !items.is_empty(),
            _ => true,
        })
    }
}

impl PadlintConfiguration {
    /// Parse JSON or JSONC text
    pub fn parse(text: &str) -> Result<Self> {
        json5::from_str(text).map_err(|e| PadlintError::config_error(e.to_string()))
    }

    /// Configuration written by `padlint config init`
    pub fn starter() -> Self {
        Self {
            schema: None,
            linter: Some(LinterConfiguration {
                enabled: Some(true),
                rules: Some(BTreeMap::new()),
            }),
            files: Some(FilesConfiguration::default()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PadlintError::internal_error(format!("Failed to serialize config: {e}")))
    }

    pub fn is_linter_enabled(&self) -> bool {
        self.linter
            .as_ref()
            .and_then(|l| l.enabled)
            .unwrap_or(true)
    }

    /// Configured rule entries, empty when none are given
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.linter
            .as_ref()
            .and_then(|l| l.rules.as_ref())
            .into_iter()
            .flatten()
            .map(|(id, setting)| (id.as_str(), setting))
    }

    pub fn rule_setting(&self, rule_id: &str) -> Option<&RuleSetting> {
        self.linter.as_ref()?.rules.as_ref()?.get(rule_id)
    }

    /// Include globs, falling back to the defaults
    pub fn include_patterns(&self) -> Vec<String> {
        self.files
            .as_ref()
            .and_then(|f| f.include.clone())
            .or_else(|| FilesConfiguration::default().include)
            .unwrap_or_default()
    }

    /// Exclude globs, falling back to the defaults
    pub fn exclude_patterns(&self) -> Vec<String> {
        self.files
            .as_ref()
            .and_then(|f| f.exclude.clone())
            .or_else(|| FilesConfiguration::default().exclude)
            .unwrap_or_default()
    }
}
