use thiserror::Error;
use useradmin_core::AdminError;

#[derive(Error, Debug)]
pub enum TraccarError {
    #[error("HTTP error: {0}")]
    Http(ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(serde_json::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, TraccarError>;

impl From<ureq::Error> for TraccarError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Json(e) => TraccarError::Parse(e),
            other => TraccarError::Http(other),
        }
    }
}

impl From<TraccarError> for AdminError {
    fn from(err: TraccarError) -> Self {
        match err {
            TraccarError::Http(e) => AdminError::Http(e.to_string()),
            TraccarError::Parse(e) => AdminError::Parse(e.to_string()),
            TraccarError::UserNotFound(id) => AdminError::NotFound(format!("user {id}")),
            TraccarError::Unauthorized => AdminError::Unauthorized,
            TraccarError::Forbidden(msg) => AdminError::Forbidden(msg),
            TraccarError::Api { status, message } => AdminError::Api { status, message },
        }
    }
}
