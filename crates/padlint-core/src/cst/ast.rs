//! Typed AST layer over CST
//!
//! This module provides ergonomic, type-safe wrappers over the raw CST nodes.
//! Each wrapper implements a `cast()` method to safely convert from CST nodes.
//!
//! # Example
//!
//! ```rust
//! use padlint_core::cst::{parse_markup, ast::{AstNode, Document}};
//!
//! let (cst, _) = parse_markup("<Icons.Fork>\n  <path />\n</Icons.Fork>");
//! let document = Document::cast(cst).expect("root is a document");
//! let element = document.elements().next().expect("one element");
//!
//! assert_eq!(element.name().map(|n| n.text()), Some("Icons.Fork".to_string()));
//! assert!(element.name().is_some_and(|n| n.is_member()));
//! assert_eq!(element.child_elements().count(), 1);
//! ```

use super::{MarkupSyntaxKind, MarkupSyntaxNode, MarkupSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: MarkupSyntaxKind) -> bool;
    fn cast(node: MarkupSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &MarkupSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: MarkupSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: MarkupSyntaxKind) -> bool {
                kind == MarkupSyntaxKind::$kind
            }

            fn cast(node: MarkupSyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then_some(Self { syntax: node })
            }

            fn syntax(&self) -> &MarkupSyntaxNode {
                &self.syntax
            }
        }
    };
}

/// Helper function to find first child of a specific AST type
fn child<N: AstNode>(parent: &MarkupSyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode>(parent: &MarkupSyntaxNode) -> impl Iterator<Item = N> + use<N> {
    parent.children().filter_map(N::cast)
}

// ============================================================================
// Document
// ============================================================================

ast_node!(
    /// Root of a parsed markup file
    Document,
    Document
);

impl Document {
    /// Top-level elements, in source order
    pub fn elements(&self) -> impl Iterator<Item = Element> + use<> {
        children(&self.syntax)
    }

    /// Every element in the file, outermost first
    pub fn all_elements(&self) -> impl Iterator<Item = Element> + use<> {
        self.syntax.descendants().filter_map(Element::cast)
    }
}

// ============================================================================
// Element
// ============================================================================

ast_node!(
    /// `<name ...>children</name>` or `<name ... />`
    Element,
    Element
);

impl Element {
    pub fn opening(&self) -> Option<OpeningElement> {
        child(&self.syntax)
    }

    pub fn closing(&self) -> Option<ClosingElement> {
        child(&self.syntax)
    }

    /// Tag name; `None` only for malformed tags
    pub fn name(&self) -> Option<ElementName> {
        self.opening().and_then(|o| o.name())
    }

    pub fn is_self_closing(&self) -> bool {
        self.opening().is_some_and(|o| o.is_self_closing())
    }

    /// Whether the element ends where the source says it does
    pub fn is_closed(&self) -> bool {
        self.is_self_closing() || self.closing().is_some()
    }

    /// Direct element children, skipping text, expressions and fragments
    pub fn child_elements(&self) -> impl Iterator<Item = Element> + use<> {
        children(&self.syntax)
    }
}

ast_node!(
    /// `<name ...>` or `<name ... />`
    OpeningElement,
    OpeningElement
);

impl OpeningElement {
    pub fn name(&self) -> Option<ElementName> {
        child(&self.syntax)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        children(&self.syntax)
    }

    pub fn is_self_closing(&self) -> bool {
        self.syntax
            .last_token()
            .is_some_and(|t| t.kind() == MarkupSyntaxKind::SlashGt)
    }
}

ast_node!(
    /// `</name>`
    ClosingElement,
    ClosingElement
);

impl ClosingElement {
    pub fn name(&self) -> Option<ElementName> {
        child(&self.syntax)
    }
}

ast_node!(
    /// Tag name such as `div`, `Icons.Fork` or `svg:rect`
    ElementName,
    ElementName
);

impl ElementName {
    /// Full name text, e.g. `Icons.Fork`
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }

    /// Name segments separated by `.` or `:`
    pub fn segments(&self) -> impl Iterator<Item = MarkupSyntaxToken> + use<> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == MarkupSyntaxKind::Ident)
    }

    /// `Icons.Fork`
    pub fn is_member(&self) -> bool {
        self.has_token(MarkupSyntaxKind::Dot)
    }

    /// `svg:rect`
    pub fn is_namespaced(&self) -> bool {
        self.has_token(MarkupSyntaxKind::Colon)
    }

    fn has_token(&self, kind: MarkupSyntaxKind) -> bool {
        self.syntax
            .children_with_tokens()
            .any(|e| e.as_token().is_some_and(|t| t.kind() == kind))
    }
}

ast_node!(
    /// `name`, `name="value"`, `name={expr}` or `{...spread}`
    Attribute,
    Attribute
);

impl Attribute {
    /// Attribute name, `None` for spreads
    pub fn name(&self) -> Option<String> {
        let first = self.syntax.first_token()?;
        (first.kind() == MarkupSyntaxKind::Ident).then(|| first.text().to_string())
    }
}

// ============================================================================
// Fragment
// ============================================================================

ast_node!(
    /// `<>children</>`
    Fragment,
    Fragment
);

impl Fragment {
    pub fn is_closed(&self) -> bool {
        self.syntax
            .children()
            .any(|n| n.kind() == MarkupSyntaxKind::ClosingFragment)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = Element> + use<> {
        children(&self.syntax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_markup;

    fn first_element(source: &str) -> Element {
        let (cst, _) = parse_markup(source);
        Document::cast(cst)
            .and_then(|d| d.all_elements().next())
            .expect("element")
    }

    #[test]
    fn test_element_names() {
        let plain = first_element("<div />");
        let name = plain.name().expect("name");
        assert_eq!(name.text(), "div");
        assert!(!name.is_member());

        let member = first_element("<Icons.Fork />");
        assert!(member.name().is_some_and(|n| n.is_member()));
        assert_eq!(
            member.name().map(|n| n.segments().count()),
            Some(2)
        );

        let namespaced = first_element("<svg:rect />");
        assert!(namespaced.name().is_some_and(|n| n.is_namespaced()));
    }

    #[test]
    fn test_self_closing_and_closed() {
        let element = first_element("<br />");
        assert!(element.is_self_closing());
        assert!(element.is_closed());

        let unclosed = first_element("<div>\n  text");
        assert!(!unclosed.is_self_closing());
        assert!(!unclosed.is_closed());
    }

    #[test]
    fn test_child_elements_skip_fragments_and_text() {
        let element = first_element("<div>\n  hi <a/> {x} <></>\n  <b/>\n</div>");
        let names: Vec<String> = element
            .child_elements()
            .filter_map(|e| e.name())
            .map(|n| n.text())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_attributes() {
        let element = first_element("<a href='x' {...rest} />");
        let opening = element.opening().expect("opening");
        let attributes: Vec<Attribute> = opening.attributes().collect();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name().as_deref(), Some("href"));
        assert_eq!(attributes[1].name(), None);
    }
}
