//! Deterministic, pure bisection logic.
//!
//! Core modules must be free of I/O side effects. They operate on an
//! in-memory [`Sequence`](crate::sequence::Sequence) and return deterministic
//! outputs suitable for tests.

pub mod index;
pub mod invariants;
pub mod selector;
