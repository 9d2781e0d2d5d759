use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::RawPayload;
use serde_json::Value;
use std::time::Duration;

pub mod endpoint;
pub mod error;
pub mod responses;
// --- Public API ---
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use responses::ApiErrorResponse;

/// The abstract interface for a source of raw transaction payloads.
///
/// The report only needs this contract: one call per calendar window, with the
/// window's contiguous `YYYYMMDD` boundaries. Swapping the HTTP client for a
/// scripted source is how the pipeline is tested.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// The endpoint this source queries.
    fn endpoint(&self) -> &Endpoint;

    /// Fetches the raw payload for the inclusive date range `[start, end]`.
    async fn fetch(&self, start: &str, end: &str) -> Result<RawPayload, ApiError>;
}

/// A concrete `TransactionSource` talking to the card issuer's HTTP API.
#[derive(Clone)]
pub struct CardApiClient {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl CardApiClient {
    pub fn new(api_config: &ApiConfig, endpoint_name: &str) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = api_config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: Endpoint::from_config(api_config, endpoint_name),
        })
    }

    /// The form POST for one window: `startDate`/`endDate` to the endpoint URL.
    pub fn build_request(&self, start: &str, end: &str) -> Result<reqwest::Request, ApiError> {
        Ok(self
            .client
            .post(self.endpoint.url())
            .form(&[("startDate", start), ("endDate", end)])
            .build()?)
    }
}

#[async_trait]
impl TransactionSource for CardApiClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn fetch(&self, start: &str, end: &str) -> Result<RawPayload, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, start, end, "Querying transactions.");

        let request = self.build_request(start, end)?;
        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        interpret_response(status, &text)
    }
}

/// Turns an HTTP status and body into a payload or a typed error.
///
/// Success bodies must be JSON objects. Error bodies are decoded as
/// `{code, message, data}` when possible, otherwise the status code and raw
/// text are reported.
pub fn interpret_response(status: u16, text: &str) -> Result<RawPayload, ApiError> {
    if (200..300).contains(&status) {
        return match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(payload)) => Ok(payload),
            Ok(other) => Err(ApiError::Deserialization(format!(
                "expected a JSON object, got: {}",
                other
            ))),
            Err(e) => Err(ApiError::Deserialization(e.to_string())),
        };
    }

    match serde_json::from_str::<ApiErrorResponse>(text) {
        Ok(body) => Err(ApiError::Request {
            code: body.code,
            message: body.message,
            data: body.data,
        }),
        Err(_) => Err(ApiError::Request {
            code: status,
            message: text.trim().to_string(),
            data: Value::Null,
        }),
    }
}
