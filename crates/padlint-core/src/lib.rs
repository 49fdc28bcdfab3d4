//! padlint Core
//!
//! Core engine for linting the blank-line layout of JSX-style markup.
//! This crate provides the lossless markup CST, the source model rules read
//! from, diagnostics, configuration, file discovery and autofix application.

pub mod autofix;
pub mod config;
pub mod console; // Terminal console utilities for rich output
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod model;
pub mod result;
pub mod source;

// Re-export commonly used types
pub use autofix::{
    apply_fixes, fix_until_stable, generate_unified_diff, generate_unified_diff_plain, Fix,
    FixConfig, FixOutcome, TextEdit,
};
pub use config::{
    ConfigLoader, FilesConfiguration, LinterConfiguration, PadlintConfiguration, RuleConfig,
    RuleSetting, RuleSeverity,
};
pub use console::{Color, Console};
pub use diagnostics::{
    Applicability, CodeSuggestion, Diagnostic, DiagnosticRenderer, Location, OutputFormat,
    Severity, SourceMap,
};
pub use discovery::FileDiscovery;
pub use error::{ErrorKind, PadlintError};
pub use model::{walk_elements, ElementVisit, ElementVisitor, MarkupModel, TokenLookup};
pub use result::{Result, ResultExt};
pub use source::SourceFile;

/// Initialize the tracing subscriber for logging
///
/// `verbosity` raises the default level: 0 = info, 1 = debug, 2+ = trace.
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = match verbosity {
        0 => "padlint=info",
        1 => "padlint=debug",
        _ => "padlint=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (e.g. from tests) must not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
