//! Opt-in exclusive lock around a bisect state file.
//!
//! Without it, concurrent invocations race and the last writer wins.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::BisectError;

/// Advisory lock held until dropped.
#[derive(Debug)]
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    /// Take the lock without waiting; fails with `StateLocked` if it is held.
    pub fn acquire(path: &Path) -> Result<Self, BisectError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|source| BisectError::StateWrite {
                location: path.display().to_string(),
                source,
            })?;
        FileExt::try_lock_exclusive(&file).map_err(|err| {
            if is_contended(&err) {
                BisectError::StateLocked {
                    path: path.to_path_buf(),
                }
            } else {
                BisectError::StateWrite {
                    location: path.display().to_string(),
                    source: err,
                }
            }
        })?;
        debug!(path = %path.display(), "state lock acquired");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            debug!(path = %self.path.display(), error = %err, "state lock release failed");
        }
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_released() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("state.lock");

        let first = StateLock::acquire(&path).expect("first lock");
        let err = StateLock::acquire(&path).expect_err("contended");
        assert!(matches!(err, BisectError::StateLocked { .. }));

        drop(first);
        let again = StateLock::acquire(&path).expect("lock after release");
        assert_eq!(again.path(), path.as_path());
    }
}
