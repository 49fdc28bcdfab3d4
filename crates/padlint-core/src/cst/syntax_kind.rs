//! Syntax kind enumeration for the markup CST
//!
//! This module defines all possible node and token types in the markup syntax tree.

use std::fmt;

/// Syntax kind for markup language elements
///
/// This enum covers:
/// - Trivia (whitespace, newlines, comments inside tags)
/// - Tag punctuation (`<`, `</`, `>`, `/>`, `=`, `.`, `:`)
/// - Literals (names, strings, text runs, `{...}` expression containers)
/// - Structural nodes (elements, fragments, names, attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum MarkupSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Spaces and tabs
    Whitespace = 0,
    /// A single `\n` (or `\r\n`)
    Newline = 1,
    /// `// ...` inside a tag
    CommentLine = 2,
    /// `/* ... */` inside a tag
    CommentBlock = 3,

    // ==================
    // Punctuation (100-149)
    // ==================
    /// `<`
    Lt = 100,
    /// `</`
    LtSlash = 101,
    /// `>`
    Gt = 102,
    /// `/>`
    SlashGt = 103,
    /// `=`
    Eq = 104,
    /// `.` in member names (`Icons.Fork`)
    Dot = 105,
    /// `:` in namespaced names (`svg:rect`)
    Colon = 106,

    // ==================
    // Literals (150-199)
    // ==================
    /// Tag or attribute name segment
    Ident = 150,
    /// Quoted attribute value
    String = 151,
    /// Run of non-whitespace text between tags
    Text = 152,
    /// Balanced `{ ... }` expression container
    ExprContainer = 153,
    /// Character the lexer could not classify
    ErrorToken = 154,
    /// End of input (never stored in the tree)
    Eof = 199,

    // ==================
    // Nodes (200+)
    // ==================
    /// Root of every tree
    Document = 200,
    /// `<name ...>children</name>` or `<name ... />`
    Element = 201,
    /// `<name ...>` or `<name ... />`
    OpeningElement = 202,
    /// `</name>`
    ClosingElement = 203,
    /// `<>children</>`
    Fragment = 204,
    /// `<>`
    OpeningFragment = 205,
    /// `</>`
    ClosingFragment = 206,
    /// Tag name, possibly dotted or namespaced
    ElementName = 207,
    /// `name`, `name="value"` or `{...spread}`
    Attribute = 208,
    /// Unparseable region
    Error = 250,
}

impl MarkupSyntaxKind {
    /// Check if this is trivia (whitespace, newlines, comments)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::CommentLine | Self::CommentBlock
        )
    }

    /// Check if this is a comment
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::CommentLine | Self::CommentBlock)
    }

    /// Check if this is tag punctuation
    pub const fn is_punct(self) -> bool {
        let raw = self as u16;
        raw >= 100 && raw < 150
    }

    /// Check if this is a node kind (not a token)
    pub const fn is_node(self) -> bool {
        self as u16 >= 200
    }

    /// Decode a raw rowan kind
    pub const fn from_raw(raw: u16) -> Option<Self> {
        let kind = match raw {
            0 => Self::Whitespace,
            1 => Self::Newline,
            2 => Self::CommentLine,
            3 => Self::CommentBlock,
            100 => Self::Lt,
            101 => Self::LtSlash,
            102 => Self::Gt,
            103 => Self::SlashGt,
            104 => Self::Eq,
            105 => Self::Dot,
            106 => Self::Colon,
            150 => Self::Ident,
            151 => Self::String,
            152 => Self::Text,
            153 => Self::ExprContainer,
            154 => Self::ErrorToken,
            199 => Self::Eof,
            200 => Self::Document,
            201 => Self::Element,
            202 => Self::OpeningElement,
            203 => Self::ClosingElement,
            204 => Self::Fragment,
            205 => Self::OpeningFragment,
            206 => Self::ClosingFragment,
            207 => Self::ElementName,
            208 => Self::Attribute,
            250 => Self::Error,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for MarkupSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<MarkupSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: MarkupSyntaxKind) -> Self {
        Self(kind as u16)
    }
}
