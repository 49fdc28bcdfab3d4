//! Sibling shape: custom-named and/or spanning several lines

use padlint_core::MarkupModel;
use padlint_core::cst::ast::{AstNode, Element, ElementName};

/// Syntactic shape of one sibling element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    /// Names a component rather than a built-in tag
    pub complex: bool,
    /// Starts and ends on different lines
    pub multiline: bool,
}

impl Shape {
    /// Built-in tag on a single line
    pub fn is_simple(self) -> bool {
        !self.complex && !self.multiline
    }
}

/// Classify `element` from its name token and line span
pub fn classify(model: &MarkupModel, element: &Element) -> Shape {
    let span = model.span(element.syntax());
    let source = model.source();
    // The end offset is exclusive; the last byte decides the end line
    let last = span.end.saturating_sub(1).max(span.start);
    Shape {
        complex: element.name().is_some_and(|name| is_custom_name(&name)),
        multiline: source.line_of(span.start) != source.line_of(last),
    }
}

/// `Card`, `Icons.Fork` and `svg:rect` name components; `div` does not
pub fn is_custom_name(name: &ElementName) -> bool {
    if name.is_member() || name.is_namespaced() {
        return true;
    }
    name.text()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}
