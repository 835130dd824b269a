//! Fixture-backed user store for useradmin testing
//!
//! `MockStore` implements `UserStore` on top of a directory of JSON fixtures
//! instead of a live server. Deletions are written back to the fixtures so a
//! sequence of CLI invocations behaves like a session against a real server.
//!
//! # Usage
//!
//! ```bash
//! USERADMIN_MOCK_DIR=./fixtures/fleet useradmin list
//! ```
//!
//! # Directory Structure
//!
//! ```text
//! fixtures/fleet/
//! ├── users.json         # The user collection
//! ├── session.json       # Operator of the current session (optional)
//! ├── mock.toml          # Injected failures (optional)
//! └── call_log.jsonl     # Runtime log (written by MockStore)
//! ```

mod faults;
mod store;

pub use faults::{Faults, FaultsError};
pub use store::{CallLogEntry, MockStore};

/// Environment variable pointing at a fixture directory
pub const MOCK_DIR_ENV: &str = "USERADMIN_MOCK_DIR";

/// Check if mock mode is enabled via environment variable
pub fn is_mock_enabled() -> bool {
    std::env::var(MOCK_DIR_ENV).is_ok()
}

/// Get the mock directory from environment, if set
pub fn get_mock_dir() -> Option<std::path::PathBuf> {
    std::env::var(MOCK_DIR_ENV)
        .ok()
        .map(std::path::PathBuf::from)
}
