//! Stable exit codes for listbisect CLI commands.

/// Command succeeded, or `next-line` printed a line to test.
pub const OK: i32 = 0;
/// Command failed (unreadable source, corrupt state, unknown label, ...).
pub const INVALID: i32 = 1;
/// `next-line` found the first bad line (bisection complete).
pub const COMPLETE: i32 = 2;
