//! Diagnostic renderer with rich terminal output
//!
//! Rendering always works from the in-memory source the diagnostics were
//! produced from, so a file being rewritten on disk cannot skew the frame.

use super::{Applicability, Diagnostic, Severity};
use crate::console::{Color, Console};
use similar::{ChangeTag, TextDiff};
use std::borrow::Cow;

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text with code frames and fix previews
    Human,
    /// One line per diagnostic: `path:line:col: severity[rule]: message`
    Compact,
    /// GitHub Actions workflow commands
    Github,
    /// JSON array for programmatic consumption
    Json,
    /// JSON with pretty-printing
    JsonPretty,
}

/// Diagnostic renderer with rich formatting
pub struct DiagnosticRenderer {
    console: Console,
    output_format: OutputFormat,
}

impl DiagnosticRenderer {
    /// Create a renderer with automatic terminal detection (human output)
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            output_format: OutputFormat::Human,
        }
    }

    /// Create a renderer with colors disabled
    pub fn no_colors() -> Self {
        Self {
            console: Console::no_colors(),
            output_format: OutputFormat::Human,
        }
    }

    /// Create a renderer with a specific output format
    pub fn with_format(format: OutputFormat) -> Self {
        let console = match format {
            OutputFormat::Human => Console::new(),
            _ => Console::no_colors(),
        };
        Self {
            console,
            output_format: format,
        }
    }

    /// Replace the console (e.g. to force colors off)
    pub fn with_console(mut self, console: Console) -> Self {
        if self.output_format == OutputFormat::Human {
            self.console = console;
        }
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.output_format
    }

    /// Render the diagnostics of one file
    pub fn render_file(&self, diagnostics: &[Diagnostic], source: &str) -> String {
        match self.output_format {
            OutputFormat::Human => {
                let mut output = String::new();
                for diagnostic in diagnostics {
                    output.push_str(&self.render_human(diagnostic, source));
                    output.push('\n');
                }
                output
            }
            OutputFormat::Compact => diagnostics
                .iter()
                .map(|d| self.render_compact(d) + "\n")
                .collect(),
            OutputFormat::Github => diagnostics
                .iter()
                .map(|d| render_github(d) + "\n")
                .collect(),
            OutputFormat::Json => render_json(diagnostics, false),
            OutputFormat::JsonPretty => render_json(diagnostics, true),
        }
    }

    /// Render diagnostics gathered from many files as a single JSON document
    pub fn render_json(&self, diagnostics: &[Diagnostic]) -> String {
        render_json(diagnostics, self.output_format == OutputFormat::JsonPretty)
    }

    /// Render one diagnostic with a code frame and a fix preview
    pub fn render_human(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.render_header(diagnostic));
        output.push('\n');

        match self.render_code_frame(diagnostic, source) {
            Some(frame) => output.push_str(&frame),
            None => {
                output.push_str(&format!(
                    "  {} {}\n",
                    self.console.colorize("→", Color::Blue),
                    self.console
                        .colorize(&diagnostic.location.to_string(), Color::Dim)
                ));
            }
        }

        if !diagnostic.suggestions.is_empty() {
            output.push_str(&self.render_fix_preview(diagnostic, source));
        }

        output
    }

    /// `severity[rule_id]: message`
    fn render_header(&self, diagnostic: &Diagnostic) -> String {
        let severity = self
            .console
            .colorize(&diagnostic.severity.to_string(), severity_color(diagnostic.severity));
        let rule_id = self
            .console
            .colorize(&format!("[{}]", diagnostic.rule_id), Color::Dim);

        format!(
            "{}{}: {}",
            severity,
            rule_id,
            self.console.colorize(&diagnostic.message, Color::Bold)
        )
    }

    fn render_compact(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "{}: {}[{}]: {}",
            diagnostic.location, diagnostic.severity, diagnostic.rule_id, diagnostic.message
        )
    }

    /// Show the offending line with one line of context on each side
    fn render_code_frame(&self, diagnostic: &Diagnostic, source: &str) -> Option<String> {
        let lines: Vec<&str> = source.lines().collect();
        let line = diagnostic.location.line;
        if line == 0 || line > lines.len() {
            return None;
        }

        let start_line = line.saturating_sub(1).max(1);
        let end_line = (line + 1).min(lines.len());
        let gutter = end_line.to_string().len();
        let color = severity_color(diagnostic.severity);
        // marker, gutter and " │ "
        let available = self.console.max_width().saturating_sub(gutter + 5).max(20);

        let mut frame = String::new();
        frame.push_str(&format!(
            "  {}─[{}]\n",
            self.console.colorize("┌", Color::Blue),
            diagnostic.location
        ));

        for number in start_line..=end_line {
            let content = fit_width(lines[number - 1], available);
            let marker = if number == line {
                self.console.colorize(">", color)
            } else {
                " ".to_string()
            };
            frame.push_str(&format!(
                "{} {}{}{}\n",
                marker,
                self.console.colorize(&format!("{number:>gutter$}"), Color::Dim),
                self.console.colorize(" │ ", Color::Dim),
                content
            ));

            if number == line {
                // Underline to the end of the line when the span continues past it
                let column = diagnostic.location.column.max(1);
                let span_width = if diagnostic.location.end_line == line {
                    diagnostic.location.end_column.saturating_sub(column)
                } else {
                    content.chars().count().saturating_sub(column - 1)
                };
                let width = span_width.min(available.saturating_sub(column - 1));
                frame.push_str(&format!(
                    "  {}{}{}{}\n",
                    " ".repeat(gutter),
                    self.console.colorize(" │ ", Color::Dim),
                    " ".repeat(column - 1),
                    self.console.colorize(&"^".repeat(width.max(1)), color)
                ));
            }
        }

        Some(frame)
    }

    /// Line diff of the lines touched by the diagnostic's suggestions
    fn render_fix_preview(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut output = String::new();

        let safe = diagnostic
            .suggestions
            .iter()
            .all(|s| s.applicability == Applicability::Always);
        let (label, label_color) = if safe {
            ("Safe fix", Color::Green)
        } else {
            ("Unsafe fix", Color::Yellow)
        };
        let message = diagnostic
            .suggestions
            .first()
            .map(|s| s.message.as_str())
            .unwrap_or_default();
        output.push_str(&format!(
            "  {} {}: {}\n",
            self.console.colorize("i", Color::Blue),
            self.console.colorize(label, label_color),
            message
        ));

        let Some((before, after, first_line)) = preview_window(diagnostic, source) else {
            return output;
        };

        let diff = TextDiff::from_lines(before.as_str(), after.as_str());
        let mut old_line = first_line;
        for change in diff.iter_all_changes() {
            let text = change.value().trim_end_matches(['\n', '\r']);
            let line = match change.tag() {
                ChangeTag::Equal => {
                    old_line += 1;
                    format!("    {:>4} │   {}", old_line - 1, text)
                        .trim_end()
                        .to_string()
                }
                ChangeTag::Delete => {
                    old_line += 1;
                    let line = format!("    {:>4} │ - {}", old_line - 1, text);
                    self.console.colorize(line.trim_end(), Color::Red)
                }
                ChangeTag::Insert => {
                    let line = format!("         │ + {text}");
                    self.console.colorize(line.trim_end(), Color::Green)
                }
            };
            output.push_str(&line);
            output.push('\n');
        }

        output
    }
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `line` to `width` chars, marking the cut with `…`
fn fit_width(line: &str, width: usize) -> Cow<'_, str> {
    if line.chars().count() <= width {
        return Cow::Borrowed(line);
    }
    let mut cut: String = line.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    Cow::Owned(cut)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

/// Whole lines covering every suggestion, before and after applying them,
/// plus the 1-based number of the first line
fn preview_window(diagnostic: &Diagnostic, source: &str) -> Option<(String, String, usize)> {
    let mut edits: Vec<_> = diagnostic
        .suggestions
        .iter()
        .map(|s| (s.location.range(), s.replacement.as_str()))
        .collect();
    edits.sort_by_key(|(range, _)| range.start);

    let start = edits.first()?.0.start;
    let end = edits.iter().map(|(range, _)| range.end).max()?;
    if end > source.len() || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
        return None;
    }

    let window_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let window_end = source[end..]
        .find('\n')
        .map(|i| end + i + 1)
        .unwrap_or(source.len());

    let before = source[window_start..window_end].to_string();
    let mut after = String::with_capacity(before.len() + 8);
    let mut cursor = window_start;
    for (range, replacement) in &edits {
        if range.start < cursor {
            return None;
        }
        after.push_str(&source[cursor..range.start]);
        after.push_str(replacement);
        cursor = range.end;
    }
    after.push_str(&source[cursor..window_end]);

    let first_line = source[..window_start].matches('\n').count() + 1;
    Some((before, after, first_line))
}

fn render_github(diagnostic: &Diagnostic) -> String {
    let level = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    };
    let location = &diagnostic.location;
    format!(
        "::{level} file={},line={},col={},endLine={},endColumn={},title={}::{}",
        location.file.display(),
        location.line,
        location.column,
        location.end_line,
        location.end_column,
        diagnostic.rule_id,
        escape_github(&diagnostic.message)
    )
}

/// Workflow commands need `%`, `\r` and `\n` percent-encoded
fn escape_github(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn render_json(diagnostics: &[Diagnostic], pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(diagnostics)
    } else {
        serde_json::to_string(diagnostics)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
}
