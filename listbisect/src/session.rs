//! Session controller: mark and query operations against a persisted sequence.
//!
//! A session owns the in-memory sequence for the lifetime of one command.
//! Every mark rewrites the whole sequence through the injected store before
//! returning, so the next invocation (in this process or another) sees it.

use tracing::{debug, info};

use crate::core::index::StatusIndex;
use crate::core::selector::{Probe, next_probe};
use crate::error::BisectError;
use crate::io::config::BisectConfig;
use crate::io::lock::StateLock;
use crate::io::paths::BisectPaths;
use crate::io::source::read_source;
use crate::io::state_store::{JsonFileStore, Origin, SequenceStore, load_or_init};
use crate::sequence::{Sequence, Status};

/// One `{label, status}` pair of the audit dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Trimmed label.
    pub label: String,
    pub status: Status,
}

/// Answer to [`Session::query_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Test this item next.
    Probe { position: usize, label: String },
    /// Bisection finished at `boundary`, the first bad item.
    Complete {
        position: usize,
        boundary: String,
        summary: Vec<SummaryLine>,
    },
}

pub struct Session<S: SequenceStore> {
    store: S,
    sequence: Sequence,
    origin: Origin,
    /// Held only so that dropping the session releases it.
    #[allow(dead_code)]
    lock: Option<StateLock>,
}

impl<S: SequenceStore> Session<S> {
    /// Load the session from `store`, creating it from the source on first use.
    ///
    /// Idempotent: once state exists, the source is ignored and existing
    /// markings are kept.
    pub fn initialize<F>(store: S, read_source: F) -> Result<Self, BisectError>
    where
        F: FnOnce() -> Result<Vec<String>, BisectError>,
    {
        Self::load(store, read_source, None)
    }

    fn load<F>(store: S, read_source: F, lock: Option<StateLock>) -> Result<Self, BisectError>
    where
        F: FnOnce() -> Result<Vec<String>, BisectError>,
    {
        let (sequence, origin) = load_or_init(&store, read_source)?;
        Ok(Self {
            store,
            sequence,
            origin,
            lock,
        })
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn index(&self) -> StatusIndex {
        StatusIndex::build(&self.sequence)
    }

    pub fn mark_good(&mut self, label: &str) -> Result<(), BisectError> {
        self.mark(label, Status::Good)
    }

    pub fn mark_bad(&mut self, label: &str) -> Result<(), BisectError> {
        self.mark(label, Status::Bad)
    }

    /// Set the status of the first item matching `label` and persist.
    ///
    /// Re-marking overwrites the previous status.
    pub fn mark(&mut self, label: &str, status: Status) -> Result<(), BisectError> {
        let item = self
            .sequence
            .find_mut(label)
            .ok_or_else(|| BisectError::label_not_found(label))?;
        let previous = std::mem::replace(&mut item.status, status);
        info!(
            position = item.position,
            label = item.display_label(),
            %previous,
            %status,
            "marked"
        );
        self.store.write(&self.sequence)
    }

    /// Next label to test, or the verdict with the full audit dump.
    pub fn query_next(&self) -> Result<QueryOutcome, BisectError> {
        let outcome = match next_probe(&self.sequence)? {
            Probe::Next(item) => {
                debug!(position = item.position, label = item.display_label(), "next probe");
                QueryOutcome::Probe {
                    position: item.position,
                    label: item.display_label().to_string(),
                }
            }
            Probe::Complete { boundary } => {
                info!(
                    position = boundary.position,
                    label = boundary.display_label(),
                    "bisect complete"
                );
                QueryOutcome::Complete {
                    position: boundary.position,
                    boundary: boundary.display_label().to_string(),
                    summary: self.summary(),
                }
            }
        };
        Ok(outcome)
    }

    /// Ordered `{label, status}` dump of every item.
    pub fn summary(&self) -> Vec<SummaryLine> {
        self.sequence
            .items()
            .iter()
            .map(|item| SummaryLine {
                label: item.display_label().to_string(),
                status: item.status,
            })
            .collect()
    }
}

impl Session<JsonFileStore> {
    /// Open the file-backed session for `paths`, locking first if configured.
    ///
    /// With locking on and no state yet, the source is read before the lock
    /// file is created, so a missing source leaves no files behind.
    pub fn open(paths: &BisectPaths, config: &BisectConfig) -> Result<Self, BisectError> {
        let store = JsonFileStore::new(&paths.state_path);
        let source_path = paths.source_path.clone();
        let session = if config.lock {
            let labels = if paths.state_path.exists() {
                None
            } else {
                Some(read_source(&source_path)?)
            };
            let lock = StateLock::acquire(&paths.lock_path)?;
            let read = move || match labels {
                Some(labels) => Ok(labels),
                None => read_source(&source_path),
            };
            Self::load(store, read, Some(lock))?
        } else {
            Self::load(store, move || read_source(&source_path), None)?
        };
        debug!(
            state = %paths.state_path.display(),
            origin = ?session.origin,
            items = session.sequence.len(),
            "session opened"
        );
        Ok(session)
    }
}
