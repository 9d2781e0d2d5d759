use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The API request returned error {code}: {message}")]
    Request {
        code: u16,
        message: String,
        data: Value,
    },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The status or API error code, when the remote side produced one.
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::Request { code, .. } => Some(*code),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Deserialization(_) => None,
        }
    }
}
