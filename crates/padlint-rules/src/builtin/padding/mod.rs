//! Blank-line padding between sibling JSX elements
//!
//! Every element with element children is one unit of work. Each child is
//! classified as simple (a built-in tag on one line) or complex (a custom
//! component or a multi-line element). Two simple neighbours sit on
//! consecutive lines; any boundary touching a complex child gets exactly
//! one blank line. The edges of the container never get padding.
//!
//! Boundaries are owned by the child that follows them, and the closing
//! edge by the last child, so each boundary is measured and fixed once.

mod classify;
mod measure;
mod plan;
mod policy;
mod report;

pub use classify::{Shape, classify, is_custom_name};
pub use measure::blank_lines_between;
pub use plan::{EditOperation, PlannedSide, Side};
pub use policy::{BlankLines, GapSpec, desired_gaps, gap_spec};
pub use report::{EXTRA_BLANK_LINES, FIXED_SPACING, MISSING_BLANK_LINE, UNEXPECTED_BLANK_LINE};

use std::ops::Range;

use padlint_core::cst::ast::{AstNode, Element};
use padlint_core::{
    Diagnostic, ElementVisit, ElementVisitor, MarkupModel, Severity, TokenLookup, walk_elements,
};
use tracing::trace;

use crate::rule::{FixKind, Rule, RuleCategory, RuleMetadata};

pub const RULE_ID: &str = "layout/multiline-jsx-padding";

/// Require blank lines around multiline or custom JSX children, disallow
/// blank lines between consecutive single-line native elements.
pub struct MultilineJsxPadding {
    metadata: RuleMetadata,
}

impl MultilineJsxPadding {
    pub fn new() -> Self {
        Self {
            metadata: RuleMetadata {
                id: RULE_ID,
                name: "multiline-jsx-padding",
                description: "Require blank lines around multiline or custom JSX children, \
                              disallow blank lines between consecutive single-line native elements.",
                severity: Severity::Warning,
                category: RuleCategory::Layout,
                fixable: FixKind::Whitespace,
                messages: report::MESSAGES,
                has_options: false,
                docs_url: None,
            },
        }
    }
}

impl Default for MultilineJsxPadding {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MultilineJsxPadding {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, model: &MarkupModel) -> Vec<Diagnostic> {
        let mut visitor = PaddingVisitor {
            metadata: &self.metadata,
            diagnostics: Vec::new(),
        };
        walk_elements(model, &mut visitor);
        visitor.diagnostics
    }
}

struct PaddingVisitor<'a> {
    metadata: &'a RuleMetadata,
    diagnostics: Vec<Diagnostic>,
}

impl ElementVisitor for PaddingVisitor<'_> {
    fn visit_element(&mut self, model: &MarkupModel, visit: &ElementVisit) {
        if visit.children.is_empty() {
            return;
        }
        let Some(opening) = visit.element.opening() else {
            return;
        };

        let shapes: Vec<Shape> = visit
            .children
            .iter()
            .map(|child| classify(model, child))
            .collect();
        let gaps = desired_gaps(&shapes);
        let opening_span = model.span(opening.syntax());
        let closing_span = visit
            .element
            .closing()
            .map(|closing| model.span(closing.syntax()));

        for (index, child) in visit.children.iter().enumerate() {
            let Some(spec) = gap_spec(&gaps, index) else {
                continue;
            };
            let span = model.span(child.syntax());
            let previous = match index {
                0 => opening_span.clone(),
                _ => model.span(visit.children[index - 1].syntax()),
            };

            let mut sides = Vec::with_capacity(2);
            sides.extend(plan_before(model, &previous, &span, spec.before));
            if index + 1 == visit.children.len() {
                match &closing_span {
                    Some(closing) => sides.extend(plan_after(model, &span, closing, spec.after)),
                    None => trace!(
                        "No closing tag after offset {}, leaving trailing gap alone",
                        span.end
                    ),
                }
            }

            let subject = report::Subject {
                rule_id: self.metadata.id,
                category: self.metadata.category.slug(),
                severity: self.metadata.severity,
                element: display_name(child),
                span,
            };
            self.diagnostics
                .extend(report::report(model.source(), subject, &sides));
        }
    }
}

/// Gap between the preceding construct `previous` and `span`
fn plan_before(
    model: &MarkupModel,
    previous: &Range<usize>,
    span: &Range<usize>,
    desired: BlankLines,
) -> Option<PlannedSide> {
    let token = model.token_before(span.start, TokenLookup::IncludeComments)?;
    if usize::from(token.text_range().end()) != previous.end {
        trace!("Content before offset {} is not whitespace, skipping", span.start);
        return None;
    }
    let source = model.source();
    let measured = measure::measure(source, previous, span)?;
    let indent = source.indent_of_line(source.line_of(span.start));
    plan::plan_side(
        source.text(),
        Side::Before,
        previous.end..span.start,
        desired,
        measured,
        indent,
    )
}

/// Gap between `span` and the parent's closing tag
fn plan_after(
    model: &MarkupModel,
    span: &Range<usize>,
    closing: &Range<usize>,
    desired: BlankLines,
) -> Option<PlannedSide> {
    let token = model.token_after(span.end, TokenLookup::IncludeComments)?;
    if usize::from(token.text_range().start()) != closing.start {
        trace!("Content after offset {} is not whitespace, skipping", span.end);
        return None;
    }
    let source = model.source();
    let measured = measure::measure(source, span, closing)?;
    let closing_line = source.line_of(closing.start);
    let indent = match source.line(closing_line) {
        Some(_) => source.indent_of_line(closing_line),
        None => source.indent_of_line(source.line_of(span.start)),
    };
    plan::plan_side(
        source.text(),
        Side::After,
        span.end..closing.start,
        desired,
        measured,
        indent,
    )
}

fn display_name(element: &Element) -> String {
    match element.name() {
        Some(name) => format!("<{}>", name.text()),
        None => "element".to_string(),
    }
}
