use serde::Deserialize;
use serde_json::Value;

/// Represents an error body returned by the card API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(alias = "error_code")]
    pub code: u16,
    #[serde(alias = "msg")]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}
