//! Load-time errors. Nothing on the per-tick path returns these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("pose library parse error: {0}")]
    Parse(String),
    #[error("action '{action}' references unknown pose '{pose}'")]
    UnknownPose { action: String, pose: String },
    #[error("pose source failed: {0}")]
    Source(String),
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Parse(err.to_string())
    }
}
