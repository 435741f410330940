//! Optional bisect configuration (`.listbisect.toml`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BisectError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".listbisect.toml";

/// Bisect configuration (TOML).
///
/// Missing fields default to the values the tool uses without a config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BisectConfig {
    /// Suffix appended to the source path to name the state file
    /// (`versions.txt` -> `versions.txt.bisect_state`).
    pub state_suffix: String,

    /// Hold an exclusive lock on the state for the duration of each command.
    pub lock: bool,
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            state_suffix: "bisect_state".to_string(),
            lock: false,
        }
    }
}

impl BisectConfig {
    pub fn validate(&self) -> Result<(), String> {
        let suffix = self.state_suffix.trim();
        if suffix.is_empty() {
            return Err("state_suffix must be non-empty".to_string());
        }
        if suffix != self.state_suffix {
            return Err("state_suffix must not have surrounding whitespace".to_string());
        }
        if suffix.contains(['/', '\\']) {
            return Err("state_suffix must not contain path separators".to_string());
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BisectConfig::default()`.
pub fn load_config(path: &Path) -> Result<BisectConfig, BisectError> {
    let invalid = |detail: String| BisectError::Config {
        path: path.to_path_buf(),
        detail,
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(BisectConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
    let cfg: BisectConfig = toml::from_str(&contents).map_err(|err| invalid(err.to_string()))?;
    cfg.validate().map_err(invalid)?;
    debug!(path = %path.display(), state_suffix = %cfg.state_suffix, lock = cfg.lock, "config loaded");
    Ok(cfg)
}
