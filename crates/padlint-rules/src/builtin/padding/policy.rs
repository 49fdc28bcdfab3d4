//! Desired blank lines at each boundary of a sibling list

use super::classify::Shape;

/// Number of blank lines a boundary should have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLines {
    Zero,
    One,
}

impl BlankLines {
    pub fn count(self) -> u32 {
        match self {
            BlankLines::Zero => 0,
            BlankLines::One => 1,
        }
    }

    /// Between two adjacent siblings: none only when both are simple
    pub fn between(first: Shape, second: Shape) -> Self {
        if first.is_simple() && second.is_simple() {
            BlankLines::Zero
        } else {
            BlankLines::One
        }
    }
}

/// Desired gaps on both sides of one sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapSpec {
    pub before: BlankLines,
    pub after: BlankLines,
}

/// One entry per boundary of `shapes`: the opening edge, each adjacent
/// pair, then the closing edge (`shapes.len() + 1` entries).
///
/// The container edges always want zero, so an only child has no padding.
pub fn desired_gaps(shapes: &[Shape]) -> Vec<BlankLines> {
    let mut gaps = Vec::with_capacity(shapes.len() + 1);
    gaps.push(BlankLines::Zero);
    gaps.extend(
        shapes
            .windows(2)
            .map(|pair| BlankLines::between(pair[0], pair[1])),
    );
    if !shapes.is_empty() {
        gaps.push(BlankLines::Zero);
    }
    gaps
}

/// Gaps on both sides of the sibling at `index`, read from a boundary list
pub fn gap_spec(gaps: &[BlankLines], index: usize) -> Option<GapSpec> {
    Some(GapSpec {
        before: *gaps.get(index)?,
        after: *gaps.get(index + 1)?,
    })
}
