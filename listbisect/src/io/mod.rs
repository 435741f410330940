//! I/O helpers for bisect commands.

pub mod config;
pub mod lock;
pub mod paths;
pub mod source;
pub mod state_store;
