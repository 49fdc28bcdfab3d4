//! padlint CLI
//!
//! Command-line interface for linting blank-line layout in JSX markup

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use padlint_core::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for a run that found issues
pub const EXIT_ISSUES: u8 = 1;
/// Exit code for usage, configuration and internal errors
pub const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "padlint")]
#[command(about = "padlint: blank-line layout linter for JSX markup")]
#[command(version = padlint_core::VERSION)]
#[command(
    long_about = "padlint keeps the blank lines between sibling JSX elements consistent.\n\
Custom components and multi-line elements get one blank line on each side,\n\
consecutive single-line native elements get none.\n\
\n\
Examples:\n  \
padlint lint                     # Lint current directory\n  \
padlint lint --write src/        # Lint and fix files in src/\n  \
padlint lint --dry-run App.tsx   # Show the fix as a diff\n  \
padlint rules explain layout/multiline-jsx-padding\n  \
padlint config init              # Write a .padlintrc.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.padlintrc.json/.padlintrc.jsonc/padlint.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint markup files for sibling padding issues
    #[command(alias = "check")]
    Lint {
        /// Files or directories to lint
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(
            short,
            long,
            default_value = "human",
            help = "Output format for diagnostics"
        )]
        format: OutputFormat,

        /// Write fixes to files (applies safe fixes by default)
        #[arg(long, help = "Write fixes to files")]
        write: bool,

        /// Show fixes without applying them
        #[arg(
            long,
            help = "Show proposed fixes as a diff without applying them",
            conflicts_with = "write"
        )]
        dry_run: bool,

        /// Apply unsafe fixes (use with --write)
        #[arg(long, help = "Apply unsafe fixes too (use with caution)")]
        r#unsafe: bool,

        /// Fail on warnings as well as errors
        #[arg(long, help = "Exit with non-zero code on warnings too")]
        error_on_warnings: bool,
    },

    /// Inspect the available rules
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,

        /// Print rule metadata as JSON
        #[arg(long, help = "Print rule metadata as JSON")]
        json: bool,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List all available rules
    List,

    /// Show detailed information about a specific rule
    Explain {
        /// Rule ID to explain
        #[arg(help = "Rule ID to show detailed information for")]
        rule_id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a starter configuration file in the current directory
    Init {
        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors and context
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// One line per diagnostic
    Compact,
    /// GitHub Actions format
    Github,
}

impl From<OutputFormat> for padlint_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => padlint_core::OutputFormat::Human,
            OutputFormat::Json => padlint_core::OutputFormat::JsonPretty,
            OutputFormat::Compact => padlint_core::OutputFormat::Compact,
            OutputFormat::Github => padlint_core::OutputFormat::Github,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let use_colors = !cli.no_color && std::env::var("NO_COLOR").is_err();
    colored::control::set_override(use_colors);

    init_tracing(cli.verbose);

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        report_fatal(&anyhow::anyhow!("Failed to set thread pool size: {e}"));
        return ExitCode::from(EXIT_ERROR);
    }

    match run_command(cli, use_colors) {
        Ok(code) => code,
        Err(e) => {
            report_fatal(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print a fatal error and its causes to stderr
fn report_fatal(error: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), error);
}

fn run_command(cli: Cli, use_colors: bool) -> anyhow::Result<ExitCode> {
    match cli.command {
        Some(Commands::Lint {
            paths,
            format,
            write,
            dry_run,
            r#unsafe,
            error_on_warnings,
        }) => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };
            commands::lint_command(commands::LintOptions {
                paths,
                format,
                write,
                dry_run,
                apply_unsafe: r#unsafe,
                error_on_warnings,
                use_colors,
                config_path: cli.config,
            })
        }

        Some(Commands::Rules { action, json }) => match action {
            Some(RulesAction::List) | None => commands::rules_list_command(json),
            Some(RulesAction::Explain { rule_id }) => {
                commands::rules_explain_command(&rule_id, json)
            }
        },

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init_command(force),
        },

        None => {
            // No subcommand provided, show help
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
