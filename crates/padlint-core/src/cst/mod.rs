//! Concrete Syntax Tree (CST) for JSX-style markup
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves every byte of the source including whitespace, newlines,
//! text runs and expression containers, so rules can measure exact line
//! layout and autofixes can rewrite a gap without touching anything else.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent storage built by [`CstBuilder`]
//! - **Red Tree**: [`MarkupSyntaxNode`] views with parent pointers and offsets
//!
//! Trivia and text between tags are stored as direct token children of the
//! enclosing `Element`, `Fragment` or `Document` node, so sibling order is
//! the order of `children_with_tokens()`.
//!
//! ## Example
//!
//! ```rust
//! use padlint_core::cst::{parse_markup, MarkupSyntaxKind};
//!
//! let source = "<div>\n  <span />\n</div>\n";
//! let (cst, errors) = parse_markup(source);
//!
//! assert!(errors.is_empty());
//! assert_eq!(cst.text().to_string(), source);
//! assert_eq!(cst.first_child().map(|n| n.kind()), Some(MarkupSyntaxKind::Element));
//! ```

mod builder;
mod language;
mod lexer;
mod parser;
mod syntax_kind;

pub mod ast;

pub use builder::CstBuilder;
pub use language::{MarkupLanguage, MarkupSyntaxElement, MarkupSyntaxNode, MarkupSyntaxToken};
pub use lexer::{lex_with_trivia, CstLexResult, CstSpan, CstToken, LexerError};
pub use parser::{parse_markup, SyntaxError, SyntaxErrorKind};
pub use syntax_kind::MarkupSyntaxKind;
