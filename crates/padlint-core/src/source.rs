//! Source text with a line index

use crate::diagnostics::{Location, SourceMap};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// An immutable source file and its line table
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    map: SourceMap,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let map = SourceMap::new(&text);
        Self {
            path: path.into(),
            text,
            map,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn map(&self) -> &SourceMap {
        &self.map
    }

    /// Content of the 1-based `line` without its line terminator
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = self.map.line_start(line)?;
        let end = self
            .map
            .line_start(line + 1)
            .unwrap_or(self.text.len());
        let content = &self.text[start..end];
        let content = content.strip_suffix('\n').unwrap_or(content);
        Some(content.strip_suffix('\r').unwrap_or(content))
    }

    /// Leading spaces and tabs of the 1-based `line` (empty when out of range)
    pub fn indent_of_line(&self, line: usize) -> &str {
        let Some(content) = self.line(line) else {
            return "";
        };
        let width = content
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count();
        &content[..width]
    }

    /// 1-based line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.map.line_of(offset)
    }

    /// 1-based `(line, column)` of `offset`
    pub fn position(&self, offset: usize) -> (usize, usize) {
        self.map.offset_to_position(offset, &self.text)
    }

    /// Diagnostic location for a byte range in this file
    pub fn location(&self, range: Range<usize>) -> Location {
        self.map.span_to_location(&range, &self.text, &self.path)
    }
}
