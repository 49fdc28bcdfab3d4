//! `padlint config` subcommands

use anyhow::{Context, bail};
use padlint_core::{PadlintConfiguration, RuleSetting, RuleSeverity, Severity};
use padlint_rules::BuiltinRules;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// File written by `padlint config init`
pub const CONFIG_FILE: &str = ".padlintrc.json";

/// Write a starter configuration to the current directory
pub fn init_command(force: bool) -> anyhow::Result<ExitCode> {
    let config_path = PathBuf::from(CONFIG_FILE);
    debug!("Initializing configuration file {}", config_path.display());

    if config_path.exists() && !force {
        bail!("Configuration file '{CONFIG_FILE}' already exists. Use --force to overwrite.");
    }

    let content = starter_config().to_json_pretty()?;
    std::fs::write(&config_path, content + "\n")
        .with_context(|| format!("Failed to write '{CONFIG_FILE}'"))?;

    println!("✔ Created configuration file: {CONFIG_FILE}");
    println!("   Edit the file to customize your linting rules.");
    Ok(ExitCode::SUCCESS)
}

/// Starter configuration listing every built-in rule at its default severity
fn starter_config() -> PadlintConfiguration {
    let mut config = PadlintConfiguration::starter();
    if let Some(rules) = config.linter.as_mut().and_then(|l| l.rules.as_mut()) {
        for rule in BuiltinRules::all() {
            let severity = match rule.metadata().severity {
                Severity::Error => RuleSeverity::Error,
                Severity::Warning => RuleSeverity::Warn,
                Severity::Info => RuleSeverity::Info,
            };
            rules.insert(rule.id().to_string(), RuleSetting::Severity(severity));
        }
    }
    config
}
