//! CLI command implementations
//!
//! `lint` and `rules` live here; `config` subcommands are in `commands/config.rs`.

pub mod config;

use anyhow::{Context, bail};
use colored::*;
use padlint_core::{
    ConfigLoader, FileDiscovery, FixConfig, PadlintError, ResultExt, fix_until_stable,
    generate_unified_diff, generate_unified_diff_plain,
};
use padlint_rules::{RuleEngine, RuleMetadata, RuleRegistry};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};

use crate::output::{FileReport, LintSummary, OutputFormatter};
use crate::{EXIT_ERROR, EXIT_ISSUES, OutputFormat};

/// Options of `padlint lint`
#[derive(Debug, Clone)]
pub struct LintOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub write: bool,
    pub dry_run: bool,
    pub apply_unsafe: bool,
    pub error_on_warnings: bool,
    pub use_colors: bool,
    pub config_path: Option<PathBuf>,
}

/// Lint command implementation
pub fn lint_command(options: LintOptions) -> anyhow::Result<ExitCode> {
    debug!("Running lint command on paths: {:?}", options.paths);
    let started = Instant::now();

    let start_dir = config_search_dir(&options.paths);
    let (config, config_file) = ConfigLoader::load(options.config_path.as_deref(), Some(&start_dir))
        .context("Failed to load configuration")?;
    match &config_file {
        Some(path) => debug!("Using configuration from {}", path.display()),
        None => debug!("Using default configuration"),
    }

    let engine = RuleEngine::from_config(&config)?;
    let files = FileDiscovery::new(&config)?.discover(&options.paths)?;
    debug!(
        "Linting {} file(s) with rules {:?}",
        files.len(),
        engine.active_rules()
    );

    let fix_config = FixConfig {
        apply_unsafe: options.apply_unsafe,
        dry_run: options.dry_run,
        ..FixConfig::default()
    };
    let results: Vec<padlint_core::Result<FileReport>> = files
        .par_iter()
        .map(|path| lint_file(&engine, path, &options, &fix_config))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result.log_and_continue() {
            Some(report) => reports.push(report),
            None => failed += 1,
        }
    }

    let summary = LintSummary::from_reports(&reports, failed);
    print!(
        "{}",
        OutputFormatter::new(options.format, options.use_colors).render(&reports, &summary)
    );
    info!(
        "Checked {} file(s) in {:?}",
        summary.files_checked,
        started.elapsed()
    );

    Ok(if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else if summary.fails(options.error_on_warnings) {
        ExitCode::from(EXIT_ISSUES)
    } else {
        ExitCode::SUCCESS
    })
}

/// Directory the config lookup starts from: the nearest existing directory
/// at or above the first path
///
/// Paths that do not exist are left for discovery to report.
fn config_search_dir(paths: &[PathBuf]) -> PathBuf {
    paths
        .first()
        .and_then(|path| {
            path.ancestors()
                .find(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
        })
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn lint_file(
    engine: &RuleEngine,
    path: &Path,
    options: &LintOptions,
    fix_config: &FixConfig,
) -> padlint_core::Result<FileReport> {
    let text = fs::read_to_string(path).map_err(|e| PadlintError::io_error(path, e))?;
    let diagnostics = engine.lint_source(path, &text);

    let fixable = diagnostics.iter().any(|d| !d.suggestions.is_empty());
    if !fixable || !(options.write || options.dry_run) {
        return Ok(FileReport {
            path: path.to_path_buf(),
            source: text,
            diagnostics,
            fixes_applied: 0,
            diff: None,
        });
    }

    let outcome = fix_until_stable(&text, fix_config, |current| {
        Ok(engine.lint_source(path, current))
    })?;
    if outcome.skipped_unsafe > 0 {
        debug!(
            "{}: {} unsafe fix(es) need --unsafe",
            path.display(),
            outcome.skipped_unsafe
        );
    }

    if options.dry_run {
        let diff = (outcome.output != text).then(|| {
            if options.use_colors {
                generate_unified_diff(&text, &outcome.output, path)
            } else {
                generate_unified_diff_plain(&text, &outcome.output, path)
            }
        });
        return Ok(FileReport {
            path: path.to_path_buf(),
            source: text,
            diagnostics,
            fixes_applied: 0,
            diff,
        });
    }

    if outcome.output != text {
        fs::write(path, &outcome.output).map_err(|e| PadlintError::io_error(path, e))?;
        debug!("Wrote {} fix(es) to {}", outcome.applied, path.display());
    }
    let remaining = engine.lint_source(path, &outcome.output);
    Ok(FileReport {
        path: path.to_path_buf(),
        source: outcome.output,
        diagnostics: remaining,
        fixes_applied: outcome.applied,
        diff: None,
    })
}

/// Rules list command implementation
pub fn rules_list_command(json: bool) -> anyhow::Result<ExitCode> {
    debug!("Listing available rules");
    let registry = RuleRegistry::with_builtins();
    let rules = registry.list();

    if json {
        let metadata: Vec<&RuleMetadata> = rules.iter().map(|r| r.metadata()).collect();
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Available Rules:");
    println!("================");
    for rule in &rules {
        let meta = rule.metadata();
        let fix = if meta.fixable.is_fixable() {
            " (fixable)".green().to_string()
        } else {
            String::new()
        };
        println!("  {}{} - {}", meta.id.bold(), fix, meta.description);
    }
    println!("\nTotal: {} rules", rules.len());
    Ok(ExitCode::SUCCESS)
}

/// Rules explain command implementation
pub fn rules_explain_command(rule_id: &str, json: bool) -> anyhow::Result<ExitCode> {
    debug!("Explaining rule: {}", rule_id);
    let registry = RuleRegistry::with_builtins();
    let Some(rule) = registry.get(rule_id) else {
        bail!("Unknown rule '{rule_id}'. Run `padlint rules list` to see available rules");
    };
    let meta = rule.metadata();

    if json {
        println!("{}", serde_json::to_string_pretty(meta)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Rule: {}", meta.id);
    println!("{}", "=".repeat(meta.id.len() + 6));
    println!();
    println!("Category: {}", meta.category.slug());
    println!("Default severity: {}", meta.severity);
    println!("Fixable: {}", meta.fixable.as_str());
    println!("Description: {}", meta.description);
    println!();
    println!("Messages:");
    for message in meta.messages {
        println!("  {}: {}", message.id.cyan(), message.text);
    }
    println!();
    println!(
        "Options: {}",
        if meta.has_options { "accepted" } else { "none" }
    );
    if let Some(url) = meta.docs_url {
        println!("Documentation: {url}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_search_dir() {
        let temp = TempDir::new().expect("tempdir");
        let file = temp.path().join("App.jsx");
        fs::write(&file, "<a/>").expect("write");

        assert_eq!(config_search_dir(&[temp.path().to_path_buf()]), temp.path().to_path_buf());
        assert_eq!(config_search_dir(&[file]), temp.path().to_path_buf());
        assert_eq!(
            config_search_dir(&[temp.path().join("missing/deeper")]),
            temp.path().to_path_buf()
        );
        assert_eq!(config_search_dir(&[PathBuf::from("missing")]), PathBuf::from("."));
        assert_eq!(config_search_dir(&[]), PathBuf::from("."));
    }
}
