//! Rule registry and engine
//!
//! The registry holds every known rule. The engine is a configured view of
//! it: which rules run, and at which severity.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use padlint_core::{Diagnostic, MarkupModel, PadlintConfiguration, PadlintError, Result, Severity};
use tracing::{debug, warn};

use crate::builtin::BuiltinRules;
use crate::rule::Rule;

/// Registry for managing rules
#[derive(Default, Clone)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in BuiltinRules::all() {
            registry.register(rule);
        }
        registry
    }

    /// Register a rule, replacing any rule with the same id
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        if let Some(slot) = self.rules.iter_mut().find(|r| r.id() == rule.id()) {
            warn!("Replacing already registered rule '{}'", rule.id());
            *slot = rule;
        } else {
            self.rules.push(rule);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.id() == id)
    }

    /// Registered rules sorted by id
    pub fn list(&self) -> Vec<&Arc<dyn Rule>> {
        let mut rules: Vec<_> = self.rules.iter().collect();
        rules.sort_by_key(|r| r.id());
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A rule scheduled to run, with its effective severity
#[derive(Clone)]
struct ActiveRule {
    rule: Arc<dyn Rule>,
    severity: Severity,
}

/// Runs the enabled rules of a registry over parsed files
#[derive(Clone)]
pub struct RuleEngine {
    registry: RuleRegistry,
    active: Vec<ActiveRule>,
}

impl RuleEngine {
    /// Engine running every registered rule at its default severity
    pub fn new(registry: RuleRegistry) -> Self {
        let active = registry
            .list()
            .into_iter()
            .map(|rule| ActiveRule {
                severity: rule.metadata().severity,
                rule: Arc::clone(rule),
            })
            .collect();
        Self { registry, active }
    }

    /// Built-in rules configured by `config`
    pub fn from_config(config: &PadlintConfiguration) -> Result<Self> {
        let mut engine = Self::new(RuleRegistry::with_builtins());
        engine.configure(config)?;
        Ok(engine)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Apply rule settings from `config`
    ///
    /// Unknown rule ids and options given to a rule without options are
    /// configuration errors; nothing is changed when one is found.
    pub fn configure(&mut self, config: &PadlintConfiguration) -> Result<()> {
        let mut overrides = BTreeMap::new();
        for (id, setting) in config.rules() {
            let Some(rule) = self.registry.get(id) else {
                return Err(PadlintError::config_error(format!("Unknown rule '{id}'")));
            };
            if setting.options().is_some() && !rule.metadata().has_options {
                return Err(PadlintError::config_error(format!(
                    "Rule '{id}' does not accept options"
                )));
            }
            if let Some(severity) = setting.severity() {
                overrides.insert(id, severity.to_severity());
            }
        }

        if !config.is_linter_enabled() {
            debug!("Linter disabled by configuration");
            self.active.clear();
            return Ok(());
        }

        self.active = self
            .registry
            .list()
            .into_iter()
            .filter_map(|rule| {
                let severity = match overrides.get(rule.id()) {
                    Some(None) => {
                        debug!("Rule '{}' turned off", rule.id());
                        return None;
                    }
                    Some(Some(severity)) => *severity,
                    None => rule.metadata().severity,
                };
                Some(ActiveRule {
                    rule: Arc::clone(rule),
                    severity,
                })
            })
            .collect();
        Ok(())
    }

    /// Ids of the rules that will run
    pub fn active_rules(&self) -> Vec<&'static str> {
        self.active.iter().map(|a| a.rule.id()).collect()
    }

    /// Run every active rule over `model`, diagnostics sorted by position
    pub fn lint(&self, model: &MarkupModel) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for active in &self.active {
            let started = Instant::now();
            let found = active.rule.check(model);
            debug!(
                "Rule '{}' found {} issue(s) in {} ({:?})",
                active.rule.id(),
                found.len(),
                model.source().path().display(),
                started.elapsed()
            );
            diagnostics.extend(found.into_iter().map(|mut diagnostic| {
                diagnostic.severity = active.severity;
                diagnostic
            }));
        }
        diagnostics.sort_by_key(|d| (d.location.offset, d.location.length));
        diagnostics
    }

    /// Parse and lint `text` as the contents of `path`
    pub fn lint_source(&self, path: impl Into<PathBuf>, text: &str) -> Vec<Diagnostic> {
        self.lint(&MarkupModel::parse(path, text))
    }
}
