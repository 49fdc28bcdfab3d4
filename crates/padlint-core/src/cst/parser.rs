//! Recursive-descent parser building the markup CST
//!
//! The parser never fails: every token is attached somewhere in the tree and
//! problems are reported as [`SyntaxError`]s alongside it. Recovery follows the
//! usual markup rules:
//! - a closing tag that matches an enclosing element closes everything opened
//!   since, each of those reported as unclosed
//! - a closing tag matching nothing becomes an `Error` node
//! - end of input inside an element leaves it without a closing tag

use super::lexer::{CstSpan, LexerError};
use super::{CstBuilder, CstToken, MarkupSyntaxKind, MarkupSyntaxNode};

/// Category of a syntax error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Reported by the lexer (unterminated string, comment or expression)
    Lexical,
    /// Element or fragment whose closing tag never appears
    UnclosedElement,
    /// Closing tag with no matching open element
    UnexpectedClosingTag,
    /// Opening or closing tag cut off by end of input
    UnterminatedTag,
    /// Token that cannot appear where it was found
    UnexpectedToken,
}

/// Error found while lexing or parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub span: CstSpan,
}

impl SyntaxError {
    fn new(kind: SyntaxErrorKind, message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }
}

impl From<LexerError> for SyntaxError {
    fn from(error: LexerError) -> Self {
        Self::new(SyntaxErrorKind::Lexical, error.message, error.span)
    }
}

/// Parse markup source into a lossless CST
///
/// # Example
///
/// ```rust
/// use padlint_core::cst::parse_markup;
///
/// let (cst, errors) = parse_markup("<ul>\n  <li />\n</ul>");
/// assert!(errors.is_empty());
/// assert_eq!(cst.text().to_string(), "<ul>\n  <li />\n</ul>");
/// ```
pub fn parse_markup(source: &str) -> (MarkupSyntaxNode, Vec<SyntaxError>) {
    let (tokens, lexer_errors) = super::lex_with_trivia(source);
    let mut parser = Parser::new(&tokens);
    parser.parse_document();

    let mut errors: Vec<SyntaxError> = lexer_errors.into_iter().map(SyntaxError::from).collect();
    errors.extend(parser.errors);
    errors.sort_by_key(|e| e.span.start);

    (parser.builder.finish(), errors)
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
    errors: Vec<SyntaxError>,
    /// Names of the elements currently open, innermost last (`""` for fragments)
    open: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
            open: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_kind(&self) -> MarkupSyntaxKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(MarkupSyntaxKind::Eof)
    }

    fn nth_kind(&self, n: usize) -> MarkupSyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(MarkupSyntaxKind::Eof)
    }

    fn current_span(&self) -> CstSpan {
        match self.tokens.get(self.pos) {
            Some(token) => token.span.clone(),
            None => {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                end..end
            }
        }
    }

    /// Add the current token to the open node and advance
    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind, &token.text);
            self.pos += 1;
        }
    }

    fn bump_trivia(&mut self) {
        while self.current_kind().is_trivia() {
            self.bump();
        }
    }

    /// Kind of the next non-trivia token at or after the cursor
    fn peek_significant(&self) -> MarkupSyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|k| !k.is_trivia())
            .unwrap_or(MarkupSyntaxKind::Eof)
    }

    fn parse_document(&mut self) {
        self.builder.start_node(MarkupSyntaxKind::Document);

        while !self.at_end() {
            match self.current_kind() {
                MarkupSyntaxKind::Lt => self.parse_element_or_fragment(),
                MarkupSyntaxKind::LtSlash => self.parse_orphan_closing(),
                _ => self.bump(),
            }
        }

        self.builder.finish_node(); // DOCUMENT
    }

    fn parse_element_or_fragment(&mut self) {
        if self.nth_kind(1) == MarkupSyntaxKind::Gt {
            self.parse_fragment();
        } else {
            self.parse_element();
        }
    }

    /// Grammar: `<` name attribute* (`/>` | `>` child* closing)
    fn parse_element(&mut self) {
        let start = self.current_span().start;
        self.builder.start_node(MarkupSyntaxKind::Element);
        self.builder.start_node(MarkupSyntaxKind::OpeningElement);
        self.bump(); // <
        self.bump_trivia();

        let name = if self.current_kind() == MarkupSyntaxKind::Ident {
            self.parse_name()
        } else {
            String::new()
        };

        self.parse_attributes();

        match self.current_kind() {
            MarkupSyntaxKind::SlashGt => {
                self.bump();
                self.builder.finish_node(); // OPENING_ELEMENT
                self.builder.finish_node(); // ELEMENT
            }
            MarkupSyntaxKind::Gt => {
                self.bump();
                self.builder.finish_node(); // OPENING_ELEMENT
                self.parse_children(name, start);
                self.builder.finish_node(); // ELEMENT
            }
            _ => {
                self.errors.push(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedTag,
                    format!("Opening tag <{name}> is not terminated"),
                    start..self.current_span().end,
                ));
                self.builder.finish_node(); // OPENING_ELEMENT
                self.builder.finish_node(); // ELEMENT
            }
        }
    }

    /// Grammar: `<>` child* `</>`
    fn parse_fragment(&mut self) {
        let start = self.current_span().start;
        self.builder.start_node(MarkupSyntaxKind::Fragment);
        self.builder.start_node(MarkupSyntaxKind::OpeningFragment);
        self.bump(); // <
        self.bump(); // >
        self.builder.finish_node(); // OPENING_FRAGMENT
        self.parse_children(String::new(), start);
        self.builder.finish_node(); // FRAGMENT
    }

    /// Dotted or namespaced tag name; returns its text with trivia removed
    fn parse_name(&mut self) -> String {
        self.builder.start_node(MarkupSyntaxKind::ElementName);
        let mut text = String::new();
        loop {
            match self.current_kind() {
                MarkupSyntaxKind::Ident | MarkupSyntaxKind::Dot | MarkupSyntaxKind::Colon => {
                    text.push_str(&self.tokens[self.pos].text);
                    self.bump();
                }
                _ => break,
            }
        }
        self.builder.finish_node(); // ELEMENT_NAME
        text
    }

    /// Attributes up to (not including) `>` or `/>`
    fn parse_attributes(&mut self) {
        loop {
            match self.current_kind() {
                k if k.is_trivia() => self.bump(),
                MarkupSyntaxKind::Gt | MarkupSyntaxKind::SlashGt | MarkupSyntaxKind::Eof => break,
                MarkupSyntaxKind::Ident => self.parse_attribute(),
                MarkupSyntaxKind::ExprContainer => {
                    // {...spread}
                    self.builder.start_node(MarkupSyntaxKind::Attribute);
                    self.bump();
                    self.builder.finish_node();
                }
                _ => {
                    self.errors.push(SyntaxError::new(
                        SyntaxErrorKind::UnexpectedToken,
                        format!("Unexpected {} in tag", self.current_kind()),
                        self.current_span(),
                    ));
                    self.builder.start_node(MarkupSyntaxKind::Error);
                    self.bump();
                    self.builder.finish_node();
                }
            }
        }
    }

    /// Grammar: name (`:` name)? (`=` value)?
    fn parse_attribute(&mut self) {
        self.builder.start_node(MarkupSyntaxKind::Attribute);
        self.bump(); // name
        if self.current_kind() == MarkupSyntaxKind::Colon
            && self.nth_kind(1) == MarkupSyntaxKind::Ident
        {
            self.bump();
            self.bump();
        }

        if self.peek_significant() == MarkupSyntaxKind::Eq {
            self.bump_trivia();
            self.bump(); // =
            if matches!(
                self.peek_significant(),
                MarkupSyntaxKind::String | MarkupSyntaxKind::ExprContainer
            ) {
                self.bump_trivia();
                self.bump(); // value
            } else {
                self.errors.push(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken,
                    "Expected attribute value after '='",
                    self.current_span(),
                ));
            }
        }
        self.builder.finish_node(); // ATTRIBUTE
    }

    /// Children of an element or fragment, through its closing tag
    fn parse_children(&mut self, name: String, start: usize) {
        self.open.push(name);

        loop {
            match self.current_kind() {
                MarkupSyntaxKind::Eof => {
                    self.report_unclosed(start);
                    break;
                }
                MarkupSyntaxKind::Lt => self.parse_element_or_fragment(),
                MarkupSyntaxKind::LtSlash => {
                    let closing = self.peek_closing_name();
                    let own = self.open.last().map(String::as_str) == Some(closing.as_str());
                    if own {
                        self.parse_closing(closing.is_empty());
                        break;
                    }
                    let enclosing = self.open[..self.open.len() - 1]
                        .iter()
                        .any(|n| *n == closing);
                    if enclosing {
                        // Leave the tag for the ancestor that owns it
                        self.report_unclosed(start);
                        break;
                    }
                    self.parse_orphan_closing();
                }
                _ => self.bump(),
            }
        }

        self.open.pop();
    }

    fn report_unclosed(&mut self, start: usize) {
        let name = self.open.last().cloned().unwrap_or_default();
        let message = if name.is_empty() {
            "Fragment is never closed".to_string()
        } else {
            format!("Element <{name}> is never closed")
        };
        self.errors.push(SyntaxError::new(
            SyntaxErrorKind::UnclosedElement,
            message,
            start..self.current_span().start,
        ));
    }

    /// Name of the closing tag at the cursor without consuming it
    fn peek_closing_name(&self) -> String {
        self.tokens[self.pos + 1..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .take_while(|t| {
                matches!(
                    t.kind,
                    MarkupSyntaxKind::Ident | MarkupSyntaxKind::Dot | MarkupSyntaxKind::Colon
                )
            })
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Grammar: `</` name? `>`
    fn parse_closing(&mut self, fragment: bool) {
        let kind = if fragment {
            MarkupSyntaxKind::ClosingFragment
        } else {
            MarkupSyntaxKind::ClosingElement
        };
        self.builder.start_node(kind);
        self.parse_closing_body();
        self.builder.finish_node();
    }

    fn parse_orphan_closing(&mut self) {
        let start = self.current_span().start;
        let name = self.peek_closing_name();
        self.builder.start_node(MarkupSyntaxKind::Error);
        self.parse_closing_body();
        self.builder.finish_node();
        self.errors.push(SyntaxError::new(
            SyntaxErrorKind::UnexpectedClosingTag,
            format!("Closing tag </{name}> has no matching opening tag"),
            start..self.current_span().start,
        ));
    }

    fn parse_closing_body(&mut self) {
        let start = self.current_span().start;
        self.bump(); // </
        self.bump_trivia();
        if self.current_kind() == MarkupSyntaxKind::Ident {
            self.parse_name();
        }
        loop {
            match self.current_kind() {
                MarkupSyntaxKind::Gt => {
                    self.bump();
                    return;
                }
                MarkupSyntaxKind::Eof => {
                    self.errors.push(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedTag,
                        "Closing tag is not terminated",
                        start..self.current_span().end,
                    ));
                    return;
                }
                _ => self.bump(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of_children(node: &MarkupSyntaxNode) -> Vec<MarkupSyntaxKind> {
        node.children().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_nested_elements() {
        let (cst, errors) = parse_markup("<div>\n  <a></a>\n  <b />\n</div>");
        assert!(errors.is_empty(), "{errors:?}");

        let div = cst.first_child().expect("element");
        assert_eq!(div.kind(), MarkupSyntaxKind::Element);
        assert_eq!(
            kinds_of_children(&div),
            vec![
                MarkupSyntaxKind::OpeningElement,
                MarkupSyntaxKind::Element,
                MarkupSyntaxKind::Element,
                MarkupSyntaxKind::ClosingElement,
            ]
        );
    }

    #[test]
    fn test_fragment() {
        let (cst, errors) = parse_markup("<>\n  <p/>\n</>");
        assert!(errors.is_empty(), "{errors:?}");
        let fragment = cst.first_child().expect("fragment");
        assert_eq!(fragment.kind(), MarkupSyntaxKind::Fragment);
        assert_eq!(
            fragment.last_child().map(|n| n.kind()),
            Some(MarkupSyntaxKind::ClosingFragment)
        );
    }

    #[test]
    fn test_unclosed_child_is_closed_by_ancestor() {
        let (cst, errors) = parse_markup("<div>\n  <span>\n</div>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnclosedElement);

        let div = cst.first_child().expect("div");
        assert_eq!(
            div.last_child().map(|n| n.kind()),
            Some(MarkupSyntaxKind::ClosingElement)
        );
        let span = div
            .children()
            .find(|n| n.kind() == MarkupSyntaxKind::Element)
            .expect("span");
        assert!(
            span.children()
                .all(|n| n.kind() != MarkupSyntaxKind::ClosingElement)
        );
    }

    #[test]
    fn test_orphan_closing_tag() {
        let (cst, errors) = parse_markup("<div></p></div>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnexpectedClosingTag);
        let div = cst.first_child().expect("div");
        assert!(
            div.children()
                .any(|n| n.kind() == MarkupSyntaxKind::Error)
        );
    }

    #[test]
    fn test_eof_inside_element() {
        let (_, errors) = parse_markup("<div>\n  <p/>\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnclosedElement);
    }

    #[test]
    fn test_attributes_are_grouped() {
        let (cst, errors) = parse_markup("<input type = \"text\" disabled {...rest} />");
        assert!(errors.is_empty(), "{errors:?}");
        let opening = cst
            .descendants()
            .find(|n| n.kind() == MarkupSyntaxKind::OpeningElement)
            .expect("opening");
        let attributes = opening
            .children()
            .filter(|n| n.kind() == MarkupSyntaxKind::Attribute)
            .count();
        assert_eq!(attributes, 3);
    }
}
