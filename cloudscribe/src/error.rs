use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;

/// All errors that can occur in cloudscribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API token not set — export API_TOKEN or put it in a .env file")]
    MissingToken,

    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("upload failed: {status} - {body}")]
    Upload { status: StatusCode, body: String },

    #[error("API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("transcript {id} still not finished after {waited:?}")]
    Timeout { id: String, waited: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
