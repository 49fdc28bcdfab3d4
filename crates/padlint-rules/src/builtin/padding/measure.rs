//! Current blank-line count between two adjacent constructs

use padlint_core::SourceFile;
use std::ops::Range;

/// Fully blank lines between a construct ending on `first_end_line` and one
/// starting on `second_start_line`.
///
/// `None` when both sit on the same line (or the lines are out of order):
/// there is no line gap to measure.
pub fn blank_lines_between(first_end_line: usize, second_start_line: usize) -> Option<u32> {
    let gap = second_start_line.checked_sub(first_end_line)?.checked_sub(1)?;
    u32::try_from(gap).ok()
}

/// Line holding the last byte of `span`
pub fn end_line(source: &SourceFile, span: &Range<usize>) -> usize {
    source.line_of(span.end.saturating_sub(1).max(span.start))
}

/// Blank lines between the byte ranges `first` and `second`
pub fn measure(source: &SourceFile, first: &Range<usize>, second: &Range<usize>) -> Option<u32> {
    blank_lines_between(end_line(source, first), source.line_of(second.start))
}
