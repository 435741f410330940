//! Semantic invariants not expressible via JSON Schema.

use crate::sequence::Sequence;

/// Check that positions are exactly `0..N-1` once sorted:
/// - No duplicate positions
/// - No gaps
///
/// Expects `sequence` to already be sorted by position.
pub fn validate_positions(sequence: &Sequence) -> Vec<String> {
    let mut errors = Vec::new();
    let mut expected = 0usize;
    for pair in sequence.items().windows(2) {
        if pair[0].position == pair[1].position {
            errors.push(format!(
                "duplicate position {} ('{}' and '{}')",
                pair[0].position,
                pair[0].display_label(),
                pair[1].display_label()
            ));
        }
    }
    for item in sequence.items() {
        if item.position > expected {
            errors.push(format!(
                "missing position {} (next is {})",
                expected, item.position
            ));
        }
        match item.position.checked_add(1) {
            Some(next) => expected = next,
            None => {
                errors.push(format!("position {} out of range", item.position));
                break;
            }
        }
    }
    errors
}
