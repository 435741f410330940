//! Status index: extremal good/bad positions and per-status counts.

use crate::sequence::{Sequence, Status};

/// Inclusive range of positions sharing one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub min: usize,
    pub max: usize,
}

impl Span {
    fn at(position: usize) -> Self {
        Self {
            min: position,
            max: position,
        }
    }

    fn include(self, position: usize) -> Self {
        Self {
            min: self.min.min(position),
            max: self.max.max(position),
        }
    }
}

/// Snapshot of the markings in a sequence.
///
/// Only the extremal positions of each status matter to the selector, so
/// markings between them can be skipped or left unmarked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusIndex {
    pub good: Option<Span>,
    pub bad: Option<Span>,
    pub good_count: usize,
    pub bad_count: usize,
    pub unmarked_count: usize,
}

impl StatusIndex {
    pub fn build(sequence: &Sequence) -> Self {
        let mut index = Self::default();
        for item in sequence.items() {
            match item.status {
                Status::Good => {
                    index.good_count += 1;
                    index.good = Some(extend(index.good, item.position));
                }
                Status::Bad => {
                    index.bad_count += 1;
                    index.bad = Some(extend(index.bad, item.position));
                }
                Status::Unmarked => index.unmarked_count += 1,
            }
        }
        index
    }

    /// Both spans, if at least one good and one bad item are marked.
    pub fn bounds(&self) -> Option<(Span, Span)> {
        Some((self.good?, self.bad?))
    }
}

fn extend(span: Option<Span>, position: usize) -> Span {
    match span {
        Some(span) => span.include(position),
        None => Span::at(position),
    }
}
