//! Replacement edits for boundaries whose gap is off

use super::policy::BlankLines;
use std::fmt;
use std::ops::Range;

/// Which side of a sibling a boundary lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Before => "before",
            Side::After => "after",
        })
    }
}

/// Replace `start..end` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl EditOperation {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A boundary that needs rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSide {
    pub side: Side,
    pub desired: BlankLines,
    pub measured: u32,
    pub edit: EditOperation,
}

/// Plan the edit for one side, `None` when the measured gap already fits.
///
/// `region` is the whole whitespace run between the two constructs and
/// `indent` the margin of the construct that follows it.
pub fn plan_side(
    text: &str,
    side: Side,
    region: Range<usize>,
    desired: BlankLines,
    measured: u32,
    indent: &str,
) -> Option<PlannedSide> {
    if measured == desired.count() {
        return None;
    }
    let newline = line_ending(text.get(region.clone()).unwrap_or_default());
    Some(PlannedSide {
        side,
        desired,
        measured,
        edit: EditOperation {
            start: region.start,
            end: region.end,
            replacement: replacement(desired, indent, newline),
        },
    })
}

/// Line breaks encoding exactly `desired` blank lines, then `indent`
pub fn replacement(desired: BlankLines, indent: &str, newline: &str) -> String {
    let breaks = desired.count() as usize + 1;
    let mut text = newline.repeat(breaks);
    text.push_str(indent);
    text
}

fn line_ending(region: &str) -> &'static str {
    if region.contains("\r\n") { "\r\n" } else { "\n" }
}
