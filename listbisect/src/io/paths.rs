//! Canonical file locations for a bisect session.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::config::BisectConfig;

/// All files derived from one source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BisectPaths {
    pub source_path: PathBuf,
    /// `<source>.<state_suffix>`
    pub state_path: PathBuf,
    /// `<state>.lock`, only touched when locking is enabled.
    pub lock_path: PathBuf,
}

impl BisectPaths {
    pub fn new(source_path: impl Into<PathBuf>, config: &BisectConfig) -> Self {
        let source_path = source_path.into();
        let state_path = append(&source_path, &config.state_suffix);
        let lock_path = append(&state_path, "lock");
        Self {
            source_path,
            state_path,
            lock_path,
        }
    }
}

fn append(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
