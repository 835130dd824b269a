//! Failure injection for mock fixtures
//!
//! `mock.toml` lists which calls should fail and how:
//!
//! ```toml
//! list = false          # fail every list_users call
//! delete = [3]          # deleting user 3 answers 500
//! session = [2]         # assuming user 2 answers 403
//! delay_ms = 0          # latency added to every call
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use useradmin_core::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faults {
    /// Fail every collection fetch
    #[serde(default)]
    pub list: bool,

    /// Users whose deletion fails
    #[serde(default)]
    pub delete: Vec<UserId>,

    /// Users whose session cannot be assumed
    #[serde(default)]
    pub session: Vec<UserId>,

    /// Simulated latency in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl Faults {
    /// Load faults from a TOML file. A missing file means no faults.
    pub fn load(path: &Path) -> Result<Self, FaultsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| FaultsError::Io(path.to_path_buf(), e))?;

        toml::from_str(&content).map_err(|e| FaultsError::Parse(path.to_path_buf(), e))
    }

    pub fn fails_delete(&self, id: UserId) -> bool {
        self.delete.contains(&id)
    }

    pub fn fails_session(&self, id: UserId) -> bool {
        self.session.contains(&id)
    }
}

#[derive(Debug, Error)]
pub enum FaultsError {
    #[error("Failed to read fault file {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Failed to parse fault file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}
