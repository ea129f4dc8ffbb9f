use thiserror::Error;

use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("API Key is missing")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

pub type Result<T> = std::result::Result<T, TutorError>;
