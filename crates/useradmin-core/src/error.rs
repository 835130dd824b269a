use thiserror::Error;

use crate::models::UserId;

/// Common errors for all user store backends
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Authentication failed")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;

/// Failures surfaced by the list view to whoever drives it
#[derive(Error, Debug)]
pub enum ViewError {
    /// The collection fetch failed; the previous snapshot is kept
    #[error("Failed to load users: {0}")]
    Load(#[source] AdminError),

    /// A delete call failed; nothing was rolled back
    #[error("Failed to remove user {id}: {source}")]
    Remove {
        id: UserId,
        #[source]
        source: AdminError,
    },

    /// The session-assumption call failed; no navigation happened
    #[error("Failed to log in as user {id}: {source}")]
    Login {
        id: UserId,
        #[source]
        source: AdminError,
    },

    #[error("Action '{0}' is not available to this operator")]
    ActionNotAllowed(&'static str),
}
