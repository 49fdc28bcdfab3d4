//! Rowan language implementation for markup
//!
//! Connects [`MarkupSyntaxKind`] to Rowan's generic CST infrastructure.

use rowan::Language;

use super::MarkupSyntaxKind;

/// Zero-sized marker type tying markup kinds to rowan trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkupLanguage;

impl Language for MarkupLanguage {
    type Kind = MarkupSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Every kind in the tree was produced by the builder from a MarkupSyntaxKind
        MarkupSyntaxKind::from_raw(raw.0).unwrap_or(MarkupSyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A node in the markup concrete syntax tree
pub type MarkupSyntaxNode = rowan::SyntaxNode<MarkupLanguage>;
/// A token (leaf) in the markup concrete syntax tree
pub type MarkupSyntaxToken = rowan::SyntaxToken<MarkupLanguage>;
/// Either a node or a token
pub type MarkupSyntaxElement = rowan::SyntaxElement<MarkupLanguage>;
