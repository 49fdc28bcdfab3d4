//! Thin wrapper over rowan's `GreenNodeBuilder` typed to markup kinds

use rowan::GreenNodeBuilder;

use super::{MarkupLanguage, MarkupSyntaxKind, MarkupSyntaxNode};
use rowan::Language;

/// Builder used by the parser to assemble the green tree
#[derive(Default)]
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node of `kind`; every call must be matched by [`Self::finish_node`]
    pub fn start_node(&mut self, kind: MarkupSyntaxKind) {
        self.inner.start_node(MarkupLanguage::kind_to_raw(kind));
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    pub fn token(&mut self, kind: MarkupSyntaxKind, text: &str) {
        self.inner.token(MarkupLanguage::kind_to_raw(kind), text);
    }

    /// Finish building and return the red root
    pub fn finish(self) -> MarkupSyntaxNode {
        MarkupSyntaxNode::new_root(self.inner.finish())
    }
}
