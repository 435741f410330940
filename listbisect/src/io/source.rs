//! Reading the source list that seeds a new bisection.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::BisectError;

/// Read one label per line, in file order.
///
/// Line terminators are stripped; every other character, blank lines
/// included, is kept as-is.
pub fn read_source(path: &Path) -> Result<Vec<String>, BisectError> {
    let contents = fs::read_to_string(path).map_err(|source| BisectError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let labels: Vec<String> = contents.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = labels.len(), "source list read");
    Ok(labels)
}
