//! One diagnostic per sibling, carrying every edit for its sides

use super::plan::PlannedSide;
use super::policy::BlankLines;
use crate::rule::{MessageTemplate, format_message};
use padlint_core::{CodeSuggestion, Diagnostic, Severity, SourceFile};
use std::ops::Range;

pub const MISSING_BLANK_LINE: &str = "missingBlankLine";
pub const EXTRA_BLANK_LINES: &str = "extraBlankLines";
pub const UNEXPECTED_BLANK_LINE: &str = "unexpectedBlankLine";
pub const FIXED_SPACING: &str = "fixedSpacing";

pub const MESSAGES: &[MessageTemplate] = &[
    MessageTemplate {
        id: MISSING_BLANK_LINE,
        text: "Expected a blank line {side} {element}.",
    },
    MessageTemplate {
        id: EXTRA_BLANK_LINES,
        text: "Expected exactly one blank line {side} {element}.",
    },
    MessageTemplate {
        id: UNEXPECTED_BLANK_LINE,
        text: "Unexpected blank line {side} {element}.",
    },
    MessageTemplate {
        id: FIXED_SPACING,
        text: "Adjust blank lines around {element}.",
    },
];

/// Message id describing one mismatched side
pub fn side_message_id(desired: BlankLines, measured: u32) -> &'static str {
    match desired {
        BlankLines::Zero => UNEXPECTED_BLANK_LINE,
        BlankLines::One if measured == 0 => MISSING_BLANK_LINE,
        BlankLines::One => EXTRA_BLANK_LINES,
    }
}

/// What a diagnostic is anchored to
pub struct Subject<'a> {
    pub rule_id: &'a str,
    pub category: &'a str,
    pub severity: Severity,
    /// Display name, e.g. `<Card>`
    pub element: String,
    pub span: Range<usize>,
}

/// Bundle the planned sides of one sibling into a diagnostic, `None` when
/// nothing was planned
pub fn report(source: &SourceFile, subject: Subject<'_>, sides: &[PlannedSide]) -> Option<Diagnostic> {
    let first = sides.first()?;
    let first_id = side_message_id(first.desired, first.measured);
    let same_kind = sides
        .iter()
        .all(|s| side_message_id(s.desired, s.measured) == first_id);

    let (message_id, side) = match (same_kind, sides.len()) {
        (true, 1) => (first_id, first.side.to_string()),
        (true, _) => (first_id, "around".to_string()),
        (false, _) => (FIXED_SPACING, String::new()),
    };
    let template = MESSAGES
        .iter()
        .find(|m| m.id == message_id)
        .map_or("", |m| m.text);
    let message = format_message(
        template,
        &[("side", side.as_str()), ("element", subject.element.as_str())],
    );

    let mut diagnostic = Diagnostic::new(
        subject.rule_id,
        subject.severity,
        message,
        source.location(subject.span),
    )
    .with_message_id(message_id)
    .with_category(subject.category);

    for planned in sides {
        diagnostic = diagnostic.with_suggestion(CodeSuggestion::safe(
            suggestion_text(planned),
            planned.edit.replacement.clone(),
            source.location(planned.edit.range()),
        ));
    }
    Some(diagnostic)
}

fn suggestion_text(planned: &PlannedSide) -> String {
    match side_message_id(planned.desired, planned.measured) {
        MISSING_BLANK_LINE => format!("Insert a blank line {}", planned.side),
        EXTRA_BLANK_LINES => format!("Keep a single blank line {}", planned.side),
        _ => format!("Remove blank lines {}", planned.side),
    }
}
