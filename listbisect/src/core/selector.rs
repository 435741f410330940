//! Deterministic probe selection for a partially marked sequence.

use crate::core::index::{Span, StatusIndex};
use crate::error::BisectError;
use crate::sequence::{Item, Sequence};

/// Which status occupies the lower positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `max_good < min_bad`: the list runs from good to bad.
    GoodFirst,
    /// Anything else: the list runs from bad to good.
    BadFirst,
}

/// Position-level outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Test the item at this position next.
    Probe(usize),
    /// Regions are adjacent; this position is the first bad item.
    Complete(usize),
}

/// Item-level outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<'a> {
    Next(&'a Item),
    Complete { boundary: &'a Item },
}

pub fn orientation(good: Span, bad: Span) -> Orientation {
    if good.max < bad.min {
        Orientation::GoodFirst
    } else {
        Orientation::BadFirst
    }
}

/// Decide the next step from the extremal good and bad positions.
///
/// The midpoint always rounds down, so an odd gap biases the probe toward
/// the lower position. Markings between the extremes are ignored.
pub fn plan(good: Span, bad: Span) -> Step {
    match orientation(good, bad) {
        Orientation::GoodFirst => {
            if good.max + 1 == bad.min {
                Step::Complete(bad.min)
            } else {
                Step::Probe(floor_midpoint(good.max, bad.min))
            }
        }
        Orientation::BadFirst => {
            if bad.max + 1 == good.min {
                Step::Complete(bad.max)
            } else {
                Step::Probe(floor_midpoint(bad.max, good.min))
            }
        }
    }
}

/// Pick the next item to test, or report the first bad item.
///
/// The status of the returned probe is not re-examined; an already marked
/// probe means the markings are inconsistent.
pub fn next_probe(sequence: &Sequence) -> Result<Probe<'_>, BisectError> {
    let index = StatusIndex::build(sequence);
    let (good, bad) = index
        .bounds()
        .ok_or_else(|| BisectError::insufficient(index.good_count, index.bad_count))?;
    match plan(good, bad) {
        Step::Probe(position) => item_at(sequence, position).map(Probe::Next),
        Step::Complete(position) => {
            item_at(sequence, position).map(|boundary| Probe::Complete { boundary })
        }
    }
}

/// `floor((far - anchor) / 2) + anchor` without leaving unsigned arithmetic.
///
/// `far` may sit below `anchor` when markings interleave; the result still
/// lies between the two.
fn floor_midpoint(anchor: usize, far: usize) -> usize {
    if far >= anchor {
        anchor + (far - anchor) / 2
    } else {
        anchor - (anchor - far).div_ceil(2)
    }
}

fn item_at(sequence: &Sequence, position: usize) -> Result<&Item, BisectError> {
    sequence
        .get(position)
        .ok_or(BisectError::PositionOutOfRange {
            position,
            len: sequence.len(),
        })
}
