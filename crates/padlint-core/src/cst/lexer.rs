//! CST-aware lexer that preserves all trivia
//!
//! Markup is context sensitive, so the lexer runs in two modes:
//! - content mode, between tags, producing text runs, whitespace, newlines and
//!   (inside an element body) `{...}` expression containers
//! - tag mode, between `<` and `>`, producing names, punctuation, strings,
//!   attribute expressions and comments
//!
//! Every byte of the input ends up in exactly one token, so the CST built from
//! these tokens reproduces the source exactly.

use crate::cst::MarkupSyntaxKind;
use std::ops::Range;

/// Simple span representing a byte range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: MarkupSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: MarkupSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagMode {
    Opening,
    Closing,
}

/// Lex markup preserving ALL trivia for CST construction
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut lexer = Lexer::new(input);
    lexer.run();
    (lexer.tokens, lexer.errors)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Number of element bodies currently open
    depth: usize,
    tag: Option<TagMode>,
    tokens: Vec<CstToken>,
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            tag: None,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.input.len() {
            let before = self.pos;
            match self.tag {
                Some(mode) => self.lex_in_tag(mode),
                None => self.lex_content(),
            }
            debug_assert!(self.pos > before, "lexer made no progress at {before}");
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset..)?.chars().next()
    }

    fn push(&mut self, kind: MarkupSyntaxKind, end: usize) {
        let start = self.pos;
        self.tokens
            .push(CstToken::new(kind, &self.input[start..end], start..end));
        self.pos = end;
    }

    fn lex_newline_or_whitespace(&mut self) -> bool {
        let bytes = self.input.as_bytes();
        match bytes[self.pos] {
            b'\n' => {
                self.push(MarkupSyntaxKind::Newline, self.pos + 1);
                true
            }
            b'\r' if bytes.get(self.pos + 1) == Some(&b'\n') => {
                self.push(MarkupSyntaxKind::Newline, self.pos + 2);
                true
            }
            b' ' | b'\t' | b'\r' => {
                let mut end = self.pos;
                while end < bytes.len()
                    && matches!(bytes[end], b' ' | b'\t' | b'\r')
                    && !(bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n'))
                {
                    end += 1;
                }
                self.push(MarkupSyntaxKind::Whitespace, end);
                true
            }
            _ => false,
        }
    }

    /// Lex one token between tags
    fn lex_content(&mut self) {
        if self.lex_newline_or_whitespace() {
            return;
        }

        match self.peek() {
            Some('<') => match self.peek_at(1) {
                Some('/') => {
                    self.push(MarkupSyntaxKind::LtSlash, self.pos + 2);
                    self.tag = Some(TagMode::Closing);
                    return;
                }
                Some(c) if c == '>' || is_name_start(c) => {
                    self.push(MarkupSyntaxKind::Lt, self.pos + 1);
                    self.tag = Some(TagMode::Opening);
                    return;
                }
                _ => {}
            },
            Some('{') if self.depth > 0 => {
                let (end, error) = scan_expression(self.input, self.pos);
                if let Some(error) = error {
                    self.errors.push(error);
                }
                self.push(MarkupSyntaxKind::ExprContainer, end);
                return;
            }
            _ => {}
        }

        // Text run: always take the first character, then stop before anything
        // that could start another token
        let mut chars = self.input[self.pos..].char_indices();
        let mut end = self.input.len();
        chars.next();
        for (idx, c) in chars {
            let stops = matches!(c, '\n' | '\r' | ' ' | '\t' | '<') || (c == '{' && self.depth > 0);
            if stops {
                end = self.pos + idx;
                break;
            }
        }
        self.push(MarkupSyntaxKind::Text, end);
    }

    /// Lex one token inside `<...>` or `</...>`
    fn lex_in_tag(&mut self, mode: TagMode) {
        if self.lex_newline_or_whitespace() {
            return;
        }

        let Some(current) = self.peek() else {
            return;
        };
        let start = self.pos;

        match current {
            '/' if self.peek_at(1) == Some('>') => {
                self.push(MarkupSyntaxKind::SlashGt, start + 2);
                self.tag = None;
            }
            '/' if self.peek_at(1) == Some('/') => {
                let end = self.input[start..]
                    .find('\n')
                    .map(|idx| start + idx)
                    .unwrap_or(self.input.len());
                // Keep a preceding `\r` out of the comment so `\r\n` lexes as one newline
                let end = if end > start && self.input.as_bytes()[end - 1] == b'\r' {
                    end - 1
                } else {
                    end
                };
                self.push(MarkupSyntaxKind::CommentLine, end.max(start + 2));
            }
            '/' if self.peek_at(1) == Some('*') => {
                let end = match self.input[start + 2..].find("*/") {
                    Some(idx) => start + 2 + idx + 2,
                    None => {
                        self.errors.push(LexerError::new(
                            "Unterminated block comment",
                            start..self.input.len(),
                        ));
                        self.input.len()
                    }
                };
                self.push(MarkupSyntaxKind::CommentBlock, end);
            }
            '>' => {
                self.push(MarkupSyntaxKind::Gt, start + 1);
                match mode {
                    TagMode::Opening => self.depth += 1,
                    TagMode::Closing => self.depth = self.depth.saturating_sub(1),
                }
                self.tag = None;
            }
            '=' => self.push(MarkupSyntaxKind::Eq, start + 1),
            '.' => self.push(MarkupSyntaxKind::Dot, start + 1),
            ':' => self.push(MarkupSyntaxKind::Colon, start + 1),
            '"' | '\'' => {
                let end = match self.input[start + 1..].find(current) {
                    Some(idx) => start + 1 + idx + 1,
                    None => {
                        self.errors.push(LexerError::new(
                            "Unterminated string literal",
                            start..self.input.len(),
                        ));
                        self.input.len()
                    }
                };
                self.push(MarkupSyntaxKind::String, end);
            }
            '{' => {
                let (end, error) = scan_expression(self.input, start);
                if let Some(error) = error {
                    self.errors.push(error);
                }
                self.push(MarkupSyntaxKind::ExprContainer, end);
            }
            c if is_name_start(c) || c.is_ascii_digit() => {
                let end = self.input[start..]
                    .char_indices()
                    .find(|(_, c)| !is_name_continue(*c))
                    .map(|(idx, _)| start + idx)
                    .unwrap_or(self.input.len());
                self.push(MarkupSyntaxKind::Ident, end);
            }
            other => {
                self.errors.push(LexerError::new(
                    format!("Unexpected character '{other}' in tag"),
                    start..start + other.len_utf8(),
                ));
                self.push(MarkupSyntaxKind::ErrorToken, start + other.len_utf8());
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_name_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '-')
}

/// Scan a balanced `{ ... }` starting at `start` (which must be `{`)
///
/// Returns the end offset (exclusive) and an error when the input ends first.
/// String literals, template literals and comments are skipped so braces inside
/// them do not count.
fn scan_expression(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return (i, None);
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    match bytes[i] {
                        b'\\' => i += 2,
                        b'$' if bytes.get(i + 1) == Some(&b'{') => {
                            let (end, error) = scan_expression(input, i + 1);
                            if error.is_some() {
                                return (input.len(), error);
                            }
                            i = end;
                        }
                        _ => i += 1,
                    }
                }
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match input[i + 2..].find("*/") {
                    Some(idx) => i + 2 + idx + 2,
                    None => bytes.len(),
                };
            }
            _ => i += 1,
        }
    }

    (
        input.len(),
        Some(LexerError::new(
            "Unterminated expression container",
            start..input.len(),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use MarkupSyntaxKind::{
        Colon, CommentBlock, Dot, Eq, ExprContainer, Gt, Ident, Lt, LtSlash, Newline, SlashGt,
        Text, Whitespace,
    };

    fn kinds(input: &str) -> Vec<MarkupSyntaxKind> {
        let (tokens, errors) = lex_with_trivia(input);
        assert!(errors.is_empty(), "unexpected lexer errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lossless() {
        let source = "<div className=\"a\">\r\n  <Icons.Fork />\n  {items.map(i => <li>{i}</li>)}\n</div>\n";
        let (tokens, errors) = lex_with_trivia(source);
        assert!(errors.is_empty());
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_self_closing_element() {
        assert_eq!(kinds("<br/>"), vec![Lt, Ident, SlashGt]);
    }

    #[test]
    fn test_member_and_namespace_names() {
        assert_eq!(
            kinds("<Icons.Fork/>"),
            vec![Lt, Ident, Dot, Ident, SlashGt]
        );
        assert_eq!(kinds("<svg:rect/>"), vec![Lt, Ident, Colon, Ident, SlashGt]);
    }

    #[test]
    fn test_text_and_newlines_between_tags() {
        assert_eq!(
            kinds("<p>\n  hi there\n</p>"),
            vec![
                Lt, Ident, Gt, Newline, Whitespace, Text, Whitespace, Text, Newline, LtSlash,
                Ident, Gt
            ]
        );
    }

    #[test]
    fn test_expression_container_only_inside_elements() {
        assert_eq!(kinds("{a}"), vec![Text]);
        assert_eq!(
            kinds("<p>{ \"}\" + `${x}` }</p>"),
            vec![Lt, Ident, Gt, ExprContainer, LtSlash, Ident, Gt]
        );
    }

    #[test]
    fn test_less_than_in_text_is_not_a_tag() {
        assert_eq!(kinds("a < b"), vec![Text, Whitespace, Text, Whitespace, Text]);
    }

    #[test]
    fn test_fragment_tokens() {
        assert_eq!(kinds("<></>"), vec![Lt, Gt, LtSlash, Gt]);
    }

    #[test]
    fn test_attributes_and_comments_in_tag() {
        assert_eq!(
            kinds("<a href='x' {...rest} /* c */ disabled>"),
            vec![
                Lt,
                Ident,
                Whitespace,
                Ident,
                Eq,
                MarkupSyntaxKind::String,
                Whitespace,
                ExprContainer,
                Whitespace,
                CommentBlock,
                Whitespace,
                Ident,
                Gt
            ]
        );
    }

    #[test]
    fn test_unterminated_expression_reports_error() {
        let (tokens, errors) = lex_with_trivia("<p>{open");
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(ExprContainer));
    }
}
