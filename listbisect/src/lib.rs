//! Resumable bisection over an ordered list.
//!
//! Finds the first "bad" line of a list of versions (or anything else with a
//! total order) from interactive good/bad markings, like `git bisect` over a
//! flat list instead of a commit graph. State lives next to the list and
//! survives across invocations. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (status index, probe selection,
//!   invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (source list, state file, config,
//!   locking).
//!
//! [`session`] coordinates the two to implement the CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
pub mod sequence;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::BisectError;
