//! Typed errors surfaced by bisection sessions.
//!
//! Every failure aborts the current operation and propagates to the caller;
//! nothing here is retried or repaired.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, marking, and probing a bisection.
#[derive(Debug, Error)]
pub enum BisectError {
    /// The source list could not be read, so no state was created.
    #[error("cannot read source list {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted state exists but cannot be trusted.
    #[error("bisect state {location} is corrupt: {detail}")]
    CorruptState { location: String, detail: String },

    /// Persisting the sequence failed.
    #[error("cannot write bisect state {location}: {source}")]
    StateWrite {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Another invocation holds the state lock.
    #[error("bisect state {path} is locked by another process")]
    StateLocked { path: PathBuf },

    #[error("no line matches '{label}'")]
    LabelNotFound { label: String },

    #[error(
        "at least one good and one bad line must be marked before the next line can be \
         calculated (good: {good}, bad: {bad})"
    )]
    InsufficientMarkings { good: usize, bad: usize },

    /// The selector computed a position outside the sequence.
    #[error("position {position} is outside the sequence of {len} items")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("invalid config {path}: {detail}")]
    Config { path: PathBuf, detail: String },
}

impl BisectError {
    pub(crate) fn corrupt(location: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CorruptState {
            location: location.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn insufficient(good: usize, bad: usize) -> Self {
        Self::InsufficientMarkings { good, bad }
    }

    pub(crate) fn label_not_found(label: &str) -> Self {
        Self::LabelNotFound {
            label: label.trim().to_string(),
        }
    }
}
