//! Persisted sequence store with schema + invariant validation.
//!
//! The [`SequenceStore`] trait decouples the session from where state lives.
//! [`JsonFileStore`] keeps it next to the source list; tests use an in-memory
//! store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_positions;
use crate::error::BisectError;
use crate::sequence::{Item, Sequence};

const STATE_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/bisect_state/v1.schema.json"
));

/// Durable copy of the sequence, always rewritten whole.
pub trait SequenceStore {
    /// Human-readable location used in error messages.
    fn location(&self) -> String;

    /// Previously persisted sequence, or `None` if no state exists yet.
    fn read(&self) -> Result<Option<Sequence>, BisectError>;

    /// Replace persisted state with `sequence`.
    fn write(&self, sequence: &Sequence) -> Result<(), BisectError>;
}

/// How a sequence came to be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Built from the source list and persisted for the first time.
    Created,
    /// Restored from existing state; the source list was not read.
    Restored,
}

/// Restore persisted state, or build and persist it from the source list.
///
/// `read_source` runs only when no state exists. Restored state is re-sorted
/// by position.
pub fn load_or_init<S, F>(store: &S, read_source: F) -> Result<(Sequence, Origin), BisectError>
where
    S: SequenceStore + ?Sized,
    F: FnOnce() -> Result<Vec<String>, BisectError>,
{
    if let Some(mut sequence) = store.read()? {
        sequence.sort_by_position();
        debug!(location = %store.location(), items = sequence.len(), "restored bisect state");
        return Ok((sequence, Origin::Restored));
    }

    let sequence = Sequence::from_labels(read_source()?);
    store.write(&sequence)?;
    debug!(location = %store.location(), items = sequence.len(), "created bisect state");
    Ok((sequence, Origin::Created))
}

/// JSON array stored at `<source>.<state_suffix>`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, detail: impl Into<String>) -> BisectError {
        BisectError::corrupt(self.location(), detail)
    }

    fn write_failed(&self, source: io::Error) -> BisectError {
        BisectError::StateWrite {
            location: self.location(),
            source,
        }
    }
}

impl SequenceStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<Sequence>, BisectError> {
        if !self.path.exists() {
            return Ok(None);
        }
        debug!(path = %self.path.display(), "loading bisect state");
        let contents = fs::read_to_string(&self.path)
            .map_err(|err| self.corrupt(format!("read failed: {err}")))?;
        parse_state(&contents)
            .map(Some)
            .map_err(|detail| self.corrupt(detail))
    }

    fn write(&self, sequence: &Sequence) -> Result<(), BisectError> {
        debug!(path = %self.path.display(), items = sequence.len(), "writing bisect state");
        let mut buf = serde_json::to_string_pretty(sequence)
            .map_err(|err| self.write_failed(io::Error::other(err)))?;
        buf.push('\n');
        write_atomic(&self.path, &buf).map_err(|err| self.write_failed(err))
    }
}

/// Parse and validate state: schema conformance + dense positions.
///
/// Returns the sequence sorted by position, or a description of what is wrong.
pub fn parse_state(contents: &str) -> Result<Sequence, String> {
    let value: Value =
        serde_json::from_str(contents).map_err(|err| format!("parse json: {err}"))?;
    validate_schema(&value)?;
    let items: Vec<Item> =
        serde_json::from_value(value).map_err(|err| format!("deserialize items: {err}"))?;
    let sequence = Sequence::from_items(items);
    let errors = validate_positions(&sequence);
    if !errors.is_empty() {
        return Err(format!("invariant violations: {}", errors.join("; ")));
    }
    Ok(sequence)
}

/// Validate JSON instance against the embedded state schema (Draft 2020-12).
fn validate_schema(instance: &Value) -> Result<(), String> {
    let schema: Value =
        serde_json::from_str(STATE_SCHEMA).map_err(|err| format!("parse schema: {err}"))?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| format!("invalid schema: {err}"))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(format!("schema validation failed: {}", messages.join("; ")));
    }
    Ok(())
}

/// Write to a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}
