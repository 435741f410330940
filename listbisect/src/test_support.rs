//! Test-only helpers for building sequences and bisect workspaces.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::BisectError;
use crate::io::config::BisectConfig;
use crate::io::paths::BisectPaths;
use crate::io::state_store::{JsonFileStore, SequenceStore};
use crate::sequence::{Sequence, Status};

/// Sequence of `len` items labelled `v0..v{len-1}` with the given markings.
pub fn marked_sequence(len: usize, good: &[usize], bad: &[usize]) -> Sequence {
    let labels = (0..len).map(|i| format!("v{i}"));
    let mut sequence = Sequence::from_labels(labels);
    for &position in good {
        mark(&mut sequence, position, Status::Good);
    }
    for &position in bad {
        mark(&mut sequence, position, Status::Bad);
    }
    sequence
}

fn mark(sequence: &mut Sequence, position: usize, status: Status) {
    let label = format!("v{position}");
    let item = sequence.find_mut(&label).expect("position within sequence");
    item.status = status;
}

/// In-memory store that counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<Option<Sequence>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(sequence: Sequence) -> Self {
        Self {
            state: RefCell::new(Some(sequence)),
            writes: RefCell::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<Sequence> {
        self.state.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl SequenceStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> Result<Option<Sequence>, BisectError> {
        Ok(self.state.borrow().clone())
    }

    fn write(&self, sequence: &Sequence) -> Result<(), BisectError> {
        *self.state.borrow_mut() = Some(sequence.clone());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Temporary directory holding a source list for a bisect session.
pub struct TestWorkspace {
    dir: tempfile::TempDir,
    source_path: PathBuf,
}

impl TestWorkspace {
    /// Create a workspace whose `versions.txt` contains one label per line.
    pub fn with_lines(lines: &[&str]) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let source_path = dir.path().join("versions.txt");
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&source_path, contents)
            .with_context(|| format!("write {}", source_path.display()))?;
        Ok(Self { dir, source_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn paths(&self) -> BisectPaths {
        BisectPaths::new(&self.source_path, &BisectConfig::default())
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.paths().state_path)
    }

    pub fn read_state(&self) -> Result<String> {
        let path = self.paths().state_path;
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
