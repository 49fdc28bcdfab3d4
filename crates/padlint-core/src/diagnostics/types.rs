//! Diagnostic types and utilities for markup linting
//!
//! Provides diagnostics with:
//! - Precise code positioning with line/column information
//! - Code suggestions with applicability levels (safe vs unsafe)
//! - Stable message identifiers for tooling

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Represents a diagnostic message from linting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Unique identifier for the rule that generated this diagnostic
    pub rule_id: String,
    /// Stable identifier of the message template, e.g. `missingBlankLine`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Location in the source file
    pub location: Location,
    /// Code suggestions for fixing the issue, applied together
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<CodeSuggestion>,
    /// Rule category slug, e.g. `layout`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

/// Location information for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// End position (1-based, exclusive column)
    pub end_line: usize,
    pub end_column: usize,
    /// Byte offset in the file
    pub offset: usize,
    /// Length of the span in bytes
    pub length: usize,
}

impl Location {
    /// Byte range covered by this location
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Indicates how a tool should manage this suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Applicability {
    /// The suggestion is definitely correct and should be applied automatically.
    /// Used for whitespace-only layout fixes.
    Always,

    /// The suggestion may be correct but requires review.
    /// Requires `--unsafe` to apply.
    MaybeIncorrect,
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applicability::Always => write!(f, "safe"),
            Applicability::MaybeIncorrect => write!(f, "unsafe"),
        }
    }
}

/// Replace the text at `location` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSuggestion {
    /// Description of the suggested fix
    pub message: String,
    /// The replacement text to apply
    pub replacement: String,
    /// Location to apply the replacement
    pub location: Location,
    /// When this suggestion should be applied
    pub applicability: Applicability,
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            message_id: None,
            severity,
            message: message.into(),
            location,
            suggestions: Vec::new(),
            category: None,
        }
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: CodeSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether every suggestion can be applied without review
    pub fn has_safe_fixes(&self) -> bool {
        !self.suggestions.is_empty()
            && self
                .suggestions
                .iter()
                .all(|s| s.applicability == Applicability::Always)
    }
}

impl CodeSuggestion {
    pub fn new(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
        applicability: Applicability,
    ) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.into(),
            location,
            applicability,
        }
    }

    /// Create a safe (always applicable) suggestion
    pub fn safe(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(message, replacement, location, Applicability::Always)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Source map for efficient byte offset to line/column conversion
///
/// Precomputes line start offsets so lookups are a binary search.
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Byte offset at which each line starts (line 1 is index 0)
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(idx, _)| idx + 1),
        );
        Self { line_starts }
    }

    /// 1-based line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    /// Byte offset where the 1-based `line` starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line.checked_sub(1)?).copied()
    }

    /// Convert byte offset to a 1-based `(line, column)` position
    ///
    /// Columns count characters, not bytes.
    pub fn offset_to_position(&self, offset: usize, source: &str) -> (usize, usize) {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line - 1];
        let end = offset.min(source.len());
        let column = source
            .get(line_start..end)
            .map(|text| text.chars().count())
            .unwrap_or(end - line_start)
            + 1;
        (line, column)
    }

    /// Create a Location from a byte span
    pub fn span_to_location(&self, span: &Range<usize>, source: &str, file: &Path) -> Location {
        let (line, column) = self.offset_to_position(span.start, source);
        let (end_line, end_column) = self.offset_to_position(span.end, source);

        Location {
            file: file.to_path_buf(),
            line,
            column,
            end_line,
            end_column,
            offset: span.start,
            length: span.end.saturating_sub(span.start),
        }
    }
}
