//! Autofix application
//!
//! This module turns diagnostics into fixes and applies them to source text:
//! - Safe-by-default application (`Applicability::Always`)
//! - Unsafe fixes only with `FixConfig::apply_unsafe`
//! - Whole-fix conflict detection, so a diagnostic's edits land together or not at all
//! - Repeated passes until a lint run proposes nothing more
//! - Unified diffs for `--dry-run` previews

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

use crate::{Applicability, Diagnostic, PadlintError, Result};

/// Replace the bytes `start..end` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            replacement: replacement.into(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Ranges overlap; ranges that only touch do not.
    /// Two insertions at the same offset overlap since their order is ambiguous.
    pub fn overlaps(&self, other: &TextEdit) -> bool {
        if self.start == self.end && other.start == other.end {
            return self.start == other.start;
        }
        self.start < other.end && other.start < self.end
    }
}

/// All edits proposed by one diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Unique identifier for this fix
    pub id: String,
    /// Rule ID that generated this fix
    pub rule_id: String,
    /// Description of what this fix does
    pub description: String,
    /// Edits applied atomically
    pub edits: Vec<TextEdit>,
    /// Applicability level (Always = safe, MaybeIncorrect = unsafe)
    pub applicability: Applicability,
}

impl Fix {
    /// Build the fix carried by a diagnostic's suggestions, if any
    ///
    /// The fix is unsafe if any one suggestion is.
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Option<Self> {
        let first = diagnostic.suggestions.first()?;
        let applicability = if diagnostic
            .suggestions
            .iter()
            .all(|s| s.applicability == Applicability::Always)
        {
            Applicability::Always
        } else {
            Applicability::MaybeIncorrect
        };

        Some(Self {
            id: format!(
                "{}-{}:{}",
                diagnostic.rule_id, diagnostic.location.line, diagnostic.location.column
            ),
            rule_id: diagnostic.rule_id.clone(),
            description: first.message.clone(),
            edits: diagnostic
                .suggestions
                .iter()
                .map(|s| TextEdit::new(s.location.range(), s.replacement.clone()))
                .collect(),
            applicability,
        })
    }

    /// Check if this fix is safe to apply automatically
    pub fn is_safe(&self) -> bool {
        matches!(self.applicability, Applicability::Always)
    }

    /// Smallest range covering every edit
    pub fn span(&self) -> Option<Range<usize>> {
        let start = self.edits.iter().map(|e| e.start).min()?;
        let end = self.edits.iter().map(|e| e.end).max()?;
        Some(start..end)
    }

    /// Check if any edit of this fix overlaps any edit of `other`
    pub fn conflicts_with(&self, other: &Fix) -> bool {
        self.edits
            .iter()
            .any(|a| other.edits.iter().any(|b| a.overlaps(b)))
    }

    fn validate(&self, source: &str) -> Result<()> {
        for (idx, edit) in self.edits.iter().enumerate() {
            if edit.start > edit.end
                || edit.end > source.len()
                || !source.is_char_boundary(edit.start)
                || !source.is_char_boundary(edit.end)
            {
                return Err(PadlintError::autofix_error(format!(
                    "Fix '{}' has an invalid range {}..{} for a {}-byte source",
                    self.id,
                    edit.start,
                    edit.end,
                    source.len()
                )));
            }
            if self.edits[idx + 1..].iter().any(|other| edit.overlaps(other)) {
                return Err(PadlintError::autofix_error(format!(
                    "Fix '{}' contains overlapping edits",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for fix application
#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes (requires --unsafe flag)
    pub apply_unsafe: bool,
    /// Whether to run in dry-run mode (don't modify files)
    pub dry_run: bool,
    /// Upper bound on lint-and-fix passes in [`fix_until_stable`]
    pub max_passes: usize,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            apply_unsafe: false,
            dry_run: false,
            max_passes: 10,
        }
    }
}

impl FixConfig {
    /// Create a config that applies all fixes (safe and unsafe)
    pub fn with_unsafe() -> Self {
        Self {
            apply_unsafe: true,
            ..Default::default()
        }
    }

    /// Create a config for dry-run preview
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }
}

/// Result of applying fixes to one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Source after the accepted fixes
    pub output: String,
    /// Number of fixes applied
    pub applied: usize,
    /// Fixes dropped because they overlap an accepted fix
    pub skipped_conflicts: usize,
    /// Unsafe fixes dropped because `apply_unsafe` is off
    pub skipped_unsafe: usize,
}

impl FixOutcome {
    fn unchanged(source: &str) -> Self {
        Self {
            output: source.to_string(),
            applied: 0,
            skipped_conflicts: 0,
            skipped_unsafe: 0,
        }
    }
}

/// Apply `fixes` to `source`
///
/// Fixes are accepted in order of their first edit; a fix that overlaps an
/// already accepted one is skipped whole. Accepted edits are then applied
/// from the back of the file so earlier offsets stay valid.
pub fn apply_fixes(source: &str, fixes: &[Fix], config: &FixConfig) -> Result<FixOutcome> {
    let mut outcome = FixOutcome::unchanged(source);

    let mut candidates: Vec<&Fix> = Vec::with_capacity(fixes.len());
    for fix in fixes {
        if !fix.is_safe() && !config.apply_unsafe {
            outcome.skipped_unsafe += 1;
            continue;
        }
        if fix.edits.is_empty() {
            continue;
        }
        fix.validate(source)?;
        candidates.push(fix);
    }
    candidates.sort_by_key(|fix| fix.span().map(|s| s.start).unwrap_or_default());

    let mut accepted: Vec<&Fix> = Vec::with_capacity(candidates.len());
    for fix in candidates {
        if accepted.iter().any(|other| other.conflicts_with(fix)) {
            trace!("Skipping fix '{}': overlaps an accepted fix", fix.id);
            outcome.skipped_conflicts += 1;
            continue;
        }
        accepted.push(fix);
    }

    let mut edits: Vec<&TextEdit> = accepted.iter().flat_map(|f| f.edits.iter()).collect();
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut output = source.to_string();
    for edit in edits {
        output.replace_range(edit.range(), &edit.replacement);
    }

    outcome.output = output;
    outcome.applied = accepted.len();
    Ok(outcome)
}

/// Lint and fix repeatedly until no applicable fix remains
///
/// `lint` is called with the current text each pass. Stops after
/// `config.max_passes` passes or when a pass changes nothing.
pub fn fix_until_stable<F>(source: &str, config: &FixConfig, mut lint: F) -> Result<FixOutcome>
where
    F: FnMut(&str) -> Result<Vec<Diagnostic>>,
{
    let mut total = FixOutcome::unchanged(source);

    for pass in 1..=config.max_passes.max(1) {
        let diagnostics = lint(&total.output)?;
        let fixes: Vec<Fix> = diagnostics.iter().filter_map(Fix::from_diagnostic).collect();
        if fixes.is_empty() {
            break;
        }

        let step = apply_fixes(&total.output, &fixes, config)?;
        debug!("Fix pass {}: applied {} fix(es)", pass, step.applied);

        total.skipped_conflicts = step.skipped_conflicts;
        total.skipped_unsafe = step.skipped_unsafe;
        if step.applied == 0 || step.output == total.output {
            break;
        }
        total.applied += step.applied;
        total.output = step.output;
    }

    Ok(total)
}

/// Generate a colored unified diff between original and modified content
pub fn generate_unified_diff(original: &str, modified: &str, file_path: &Path) -> String {
    unified_diff(original, modified, file_path, true)
}

/// Generate a unified diff without colors (for file output)
pub fn generate_unified_diff_plain(original: &str, modified: &str, file_path: &Path) -> String {
    unified_diff(original, modified, file_path, false)
}

fn unified_diff(original: &str, modified: &str, file_path: &Path, colorize: bool) -> String {
    use similar::TextDiff;

    let path = file_path.display().to_string();
    let diff = TextDiff::from_lines(original, modified);
    let plain = diff
        .unified_diff()
        .context_radius(3)
        .header(&path, &format!("{path} (fixed)"))
        .to_string();

    if !colorize {
        return plain;
    }

    let mut output = String::with_capacity(plain.len() + 64);
    for line in plain.split_inclusive('\n') {
        let code = if line.starts_with("---") || line.starts_with("+++") {
            Some("1")
        } else if line.starts_with("@@") {
            Some("36")
        } else if line.starts_with('+') {
            Some("32")
        } else if line.starts_with('-') {
            Some("31")
        } else {
            None
        };
        match code {
            Some(code) => {
                let body = line.strip_suffix('\n').unwrap_or(line);
                output.push_str(&format!("\x1b[{code}m{body}\x1b[0m"));
                if line.ends_with('\n') {
                    output.push('\n');
                }
            }
            None => output.push_str(line),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodeSuggestion, Location, Severity};

    fn fix(id: &str, edits: Vec<(Range<usize>, &str)>) -> Fix {
        Fix {
            id: id.to_string(),
            rule_id: "test/rule".to_string(),
            description: "test".to_string(),
            edits: edits
                .into_iter()
                .map(|(range, text)| TextEdit::new(range, text))
                .collect(),
            applicability: Applicability::Always,
        }
    }

    #[test]
    fn test_touching_edits_do_not_conflict() {
        let a = fix("a", vec![(0..3, "x")]);
        let b = fix("b", vec![(3..5, "y")]);
        let c = fix("c", vec![(2..4, "z")]);
        assert!(!a.conflicts_with(&b));
        assert!(a.conflicts_with(&c));
        assert!(b.conflicts_with(&c));
    }

    #[test]
    fn test_insertions_at_same_offset_conflict() {
        let a = fix("a", vec![(2..2, "x")]);
        let b = fix("b", vec![(2..2, "y")]);
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn test_apply_multi_edit_fix_atomically() {
        let source = "a\n\n\nb\nc";
        let collapse = fix("f", vec![(1..4, "\n"), (5..6, "\n\n")]);
        let outcome = apply_fixes(source, &[collapse], &FixConfig::default()).expect("apply");
        assert_eq!(outcome.output, "a\nb\n\nc");
        assert_eq!(outcome.applied, 1);
    }

    #[test]
    fn test_conflicting_fix_is_skipped_whole() {
        let source = "0123456789";
        let first = fix("first", vec![(1..3, "A")]);
        let second = fix("second", vec![(2..4, "B"), (8..9, "C")]);
        let outcome =
            apply_fixes(source, &[second, first], &FixConfig::default()).expect("apply");
        assert_eq!(outcome.output, "0A3456789");
        assert_eq!(outcome.skipped_conflicts, 1);
    }

    #[test]
    fn test_unsafe_fix_requires_flag() {
        let mut risky = fix("risky", vec![(0..1, "X")]);
        risky.applicability = Applicability::MaybeIncorrect;

        let safe_only = apply_fixes("abc", std::slice::from_ref(&risky), &FixConfig::default())
            .expect("apply");
        assert_eq!(safe_only.output, "abc");
        assert_eq!(safe_only.skipped_unsafe, 1);

        let with_unsafe =
            apply_fixes("abc", &[risky], &FixConfig::with_unsafe()).expect("apply");
        assert_eq!(with_unsafe.output, "Xbc");
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let broken = fix("broken", vec![(2..40, "")]);
        let err = apply_fixes("abc", &[broken], &FixConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Autofix);
    }

    #[test]
    fn test_from_diagnostic_collects_all_suggestions() {
        let location = |offset: usize, length: usize| Location {
            offset,
            length,
            ..Location::default()
        };
        let diagnostic = Diagnostic::new("layout/x", Severity::Warning, "m", location(0, 1))
            .with_suggestion(CodeSuggestion::safe("one", "\n", location(0, 2)))
            .with_suggestion(CodeSuggestion::safe("two", "\n\n", location(5, 1)));

        let fix = Fix::from_diagnostic(&diagnostic).expect("fix");
        assert_eq!(fix.edits.len(), 2);
        assert_eq!(fix.span(), Some(0..6));
        assert!(fix.is_safe());

        let bare = Diagnostic::new("layout/x", Severity::Warning, "m", location(0, 1));
        assert!(Fix::from_diagnostic(&bare).is_none());
    }

    #[test]
    fn test_fix_until_stable_reruns_lint() {
        // Each pass removes one leading 'x'
        let lint = |text: &str| -> Result<Vec<Diagnostic>> {
            Ok(if text.starts_with('x') {
                let location = Location {
                    offset: 0,
                    length: 1,
                    ..Location::default()
                };
                vec![
                    Diagnostic::new("t", Severity::Warning, "x", location.clone())
                        .with_suggestion(CodeSuggestion::safe("drop", "", location)),
                ]
            } else {
                Vec::new()
            })
        };

        let outcome = fix_until_stable("xxxabc", &FixConfig::default(), lint).expect("fix");
        assert_eq!(outcome.output, "abc");
        assert_eq!(outcome.applied, 3);
    }

    #[test]
    fn test_plain_unified_diff() {
        let diff = generate_unified_diff_plain("a\nb\n", "a\n\nb\n", Path::new("x.jsx"));
        assert!(diff.starts_with("--- x.jsx\n+++ x.jsx (fixed)\n"));
        assert!(diff.contains("@@ -1,2 +1,3 @@"));
        assert!(diff.contains("\n+\n"));
    }
}
