//! Output formatting and reporting

use colored::*;
use padlint_core::{Console, Diagnostic, DiagnosticRenderer, Severity};
use std::path::PathBuf;

use crate::OutputFormat;

/// Lint result of one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Text the diagnostics refer to (the fixed text after `--write`)
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    pub fixes_applied: usize,
    /// Unified diff of the proposed fixes (`--dry-run`)
    pub diff: Option<String>,
}

/// Summary statistics for linting results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSummary {
    pub files_checked: usize,
    pub files_failed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub fixes_applied: usize,
}

impl LintSummary {
    pub fn from_reports(reports: &[FileReport], files_failed: usize) -> Self {
        let mut summary = Self {
            files_checked: reports.len(),
            files_failed,
            ..Self::default()
        };
        for report in reports {
            summary.fixes_applied += report.fixes_applied;
            for diagnostic in &report.diagnostics {
                match diagnostic.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => summary.info += 1,
                }
            }
        }
        summary
    }

    pub fn has_issues(&self) -> bool {
        self.errors + self.warnings + self.info > 0
    }

    /// Whether the run should exit with a failure code
    pub fn fails(&self, error_on_warnings: bool) -> bool {
        self.errors > 0 || (error_on_warnings && self.warnings > 0)
    }
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    fn renderer(&self) -> DiagnosticRenderer {
        let renderer = DiagnosticRenderer::with_format(self.format.into());
        if self.use_colors {
            renderer
        } else {
            renderer.with_console(Console::no_colors())
        }
    }

    /// Render every report and the summary as the text printed to stdout
    pub fn render(&self, reports: &[FileReport], summary: &LintSummary) -> String {
        let renderer = self.renderer();
        match self.format {
            OutputFormat::Json => {
                let all: Vec<Diagnostic> = reports
                    .iter()
                    .flat_map(|r| r.diagnostics.iter().cloned())
                    .collect();
                let mut output = renderer.render_json(&all);
                output.push('\n');
                output
            }
            OutputFormat::Human => {
                let mut output = String::new();
                for report in reports {
                    if let Some(diff) = &report.diff {
                        output.push_str(diff);
                        output.push('\n');
                    }
                    output.push_str(&renderer.render_file(&report.diagnostics, &report.source));
                }
                if !summary.has_issues() && summary.files_failed == 0 {
                    output.push_str(&format!("{} No issues found\n", "✔".green()));
                }
                output.push_str(&self.render_summary(summary));
                output
            }
            OutputFormat::Compact | OutputFormat::Github => reports
                .iter()
                .map(|report| renderer.render_file(&report.diagnostics, &report.source))
                .collect(),
        }
    }

    fn render_summary(&self, summary: &LintSummary) -> String {
        let mut lines = vec![format!("\n{}", "Summary:".bold())];
        lines.push(format!("  Files checked: {}", summary.files_checked));
        if summary.files_failed > 0 {
            lines.push(format!(
                "  Files failed: {}",
                summary.files_failed.to_string().red()
            ));
        }
        if summary.has_issues() {
            lines.push("  Issues found:".to_string());
            if summary.errors > 0 {
                lines.push(format!("    Errors: {}", summary.errors.to_string().red()));
            }
            if summary.warnings > 0 {
                lines.push(format!(
                    "    Warnings: {}",
                    summary.warnings.to_string().yellow()
                ));
            }
            if summary.info > 0 {
                lines.push(format!("    Info: {}", summary.info.to_string().blue()));
            }
        }
        if summary.fixes_applied > 0 {
            lines.push(format!(
                "  Fixes applied: {}",
                summary.fixes_applied.to_string().green()
            ));
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
