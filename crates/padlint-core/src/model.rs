//! Parsed markup file plus the queries rules run against it
//!
//! A [`MarkupModel`] owns one file's CST and source text. Rules read it
//! through token lookup and the [`walk_elements`] traversal; nothing here
//! mutates the tree.

use crate::cst::ast::{AstNode, Document, Element};
use crate::cst::{parse_markup, MarkupSyntaxKind, MarkupSyntaxNode, MarkupSyntaxToken, SyntaxError};
use crate::source::SourceFile;
use rowan::TextSize;
use std::ops::Range;
use std::path::PathBuf;
use tracing::trace;

/// Whether token lookup may stop on comment tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLookup {
    /// Step over whitespace, newlines and comments
    SkipComments,
    /// Step over whitespace and newlines only
    IncludeComments,
}

impl TokenLookup {
    fn skips(self, kind: MarkupSyntaxKind) -> bool {
        match self {
            TokenLookup::SkipComments => kind.is_trivia(),
            TokenLookup::IncludeComments => kind.is_trivia() && !kind.is_comment(),
        }
    }
}

/// A parsed markup file
#[derive(Debug, Clone)]
pub struct MarkupModel {
    cst: MarkupSyntaxNode,
    source: SourceFile,
    parse_errors: Vec<SyntaxError>,
}

impl MarkupModel {
    /// Parse `text` as the contents of `path`
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let source = SourceFile::new(path, text);
        let (cst, parse_errors) = parse_markup(source.text());
        if !parse_errors.is_empty() {
            trace!(
                "{} syntax error(s) in {}",
                parse_errors.len(),
                source.path().display()
            );
        }
        Self {
            cst,
            source,
            parse_errors,
        }
    }

    pub fn cst(&self) -> &MarkupSyntaxNode {
        &self.cst
    }

    pub fn document(&self) -> Option<Document> {
        Document::cast(self.cst.clone())
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn parse_errors(&self) -> &[SyntaxError] {
        &self.parse_errors
    }

    /// Byte range of a node
    pub fn span(&self, node: &MarkupSyntaxNode) -> Range<usize> {
        let range = node.text_range();
        usize::from(range.start())..usize::from(range.end())
    }

    /// Nearest significant token ending at or before `offset`
    pub fn token_before(&self, offset: usize, lookup: TokenLookup) -> Option<MarkupSyntaxToken> {
        let mut token = self.cst.token_at_offset(self.text_size(offset)?).left_biased()?;
        if usize::from(token.text_range().start()) >= offset {
            token = token.prev_token()?;
        }
        while lookup.skips(token.kind()) {
            token = token.prev_token()?;
        }
        Some(token)
    }

    /// Nearest significant token starting at or after `offset`
    pub fn token_after(&self, offset: usize, lookup: TokenLookup) -> Option<MarkupSyntaxToken> {
        let mut token = self.cst.token_at_offset(self.text_size(offset)?).right_biased()?;
        if usize::from(token.text_range().end()) <= offset {
            token = token.next_token()?;
        }
        while lookup.skips(token.kind()) {
            token = token.next_token()?;
        }
        Some(token)
    }

    fn text_size(&self, offset: usize) -> Option<TextSize> {
        if offset > self.source.text().len() {
            return None;
        }
        u32::try_from(offset).ok().map(TextSize::from)
    }
}

/// One element together with its surroundings, as seen by a visitor
#[derive(Debug, Clone)]
pub struct ElementVisit {
    pub element: Element,
    /// Enclosing node: another element, a fragment or the document
    pub parent: Option<MarkupSyntaxNode>,
    /// Direct element children in source order
    pub children: Vec<Element>,
}

/// Callback invoked once per element by [`walk_elements`]
pub trait ElementVisitor {
    fn visit_element(&mut self, model: &MarkupModel, visit: &ElementVisit);
}

impl<F> ElementVisitor for F
where
    F: FnMut(&MarkupModel, &ElementVisit),
{
    fn visit_element(&mut self, model: &MarkupModel, visit: &ElementVisit) {
        self(model, visit)
    }
}

/// Visit every element of `model` in document order (outer before inner)
pub fn walk_elements(model: &MarkupModel, visitor: &mut impl ElementVisitor) {
    for node in model.cst.descendants() {
        let Some(element) = Element::cast(node) else {
            continue;
        };
        let visit = ElementVisit {
            parent: element.syntax().parent(),
            children: element.child_elements().collect(),
            element,
        };
        visitor.visit_element(model, &visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_visits_outer_first_with_children() {
        let model = MarkupModel::parse("a.jsx", "<ul>\n  <li>\n    <b/>\n  </li>\n  <li/>\n</ul>");
        let mut seen = Vec::new();
        walk_elements(&model, &mut |_: &MarkupModel, visit: &ElementVisit| {
            let name = visit.element.name().map(|n| n.text()).unwrap_or_default();
            seen.push((name, visit.children.len()));
        });

        assert_eq!(
            seen,
            vec![
                ("ul".to_string(), 2),
                ("li".to_string(), 1),
                ("b".to_string(), 0),
                ("li".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_parent_of_top_level_element_is_document() {
        let model = MarkupModel::parse("a.jsx", "<a/>");
        let mut parents = Vec::new();
        walk_elements(&model, &mut |_: &MarkupModel, visit: &ElementVisit| {
            parents.push(visit.parent.as_ref().map(|p| p.kind()));
        });
        assert_eq!(parents, vec![Some(MarkupSyntaxKind::Document)]);
    }

    #[test]
    fn test_token_lookup_skips_whitespace() {
        let source = "<div>\n\n  <a/>\n</div>";
        let model = MarkupModel::parse("a.jsx", source);
        let a = source.find("<a").expect("a");

        let before = model
            .token_before(a, TokenLookup::IncludeComments)
            .expect("token before");
        assert_eq!(before.kind(), MarkupSyntaxKind::Gt);
        assert_eq!(usize::from(before.text_range().end()), 4 + 1);

        let after_a = a + "<a/>".len();
        let after = model
            .token_after(after_a, TokenLookup::IncludeComments)
            .expect("token after");
        assert_eq!(after.kind(), MarkupSyntaxKind::LtSlash);
    }

    #[test]
    fn test_token_lookup_stops_on_text() {
        let source = "<p>\n  hi\n  <a/>\n</p>";
        let model = MarkupModel::parse("a.jsx", source);
        let a = source.find("<a").expect("a");
        let before = model
            .token_before(a, TokenLookup::SkipComments)
            .expect("token before");
        assert_eq!(before.kind(), MarkupSyntaxKind::Text);
        assert_eq!(before.text(), "hi");
    }

    #[test]
    fn test_token_lookup_at_file_edges() {
        let model = MarkupModel::parse("a.jsx", "<a/>");
        assert!(model.token_before(0, TokenLookup::SkipComments).is_none());
        assert!(model.token_after(4, TokenLookup::SkipComments).is_none());
        assert!(model.token_after(99, TokenLookup::SkipComments).is_none());
    }

    #[test]
    fn test_parse_errors_are_kept() {
        let model = MarkupModel::parse("a.jsx", "<div>\n  <a/>\n");
        assert_eq!(model.parse_errors().len(), 1);
        assert!(model.document().is_some());
    }
}
