use serde::Deserialize;
use thiserror::Error;

/// Error taxonomy for the workflow client.
///
/// Validation errors never reach the network; network and server errors
/// are scoped to the active dialog or command and leave entered state
/// intact for retry. Duplicate attachment names are handled by silent
/// dedup and never surface here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Structured backend rejection; `message` is surfaced verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("could not decode response from {url}: {detail}")]
    Decode { url: String, detail: String },
    #[error("no API token configured; set FIXDESK_BACKEND_TOKEN or fixdesk.toml [backend].token")]
    TokenMissing,
}

impl ApiError {
    /// Transient failures worth one more try on read paths.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Server { status, .. } => matches!(status, 500 | 502 | 503 | 504 | 429),
            _ => false,
        }
    }
}

/// Error body the backend sends: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

/// Map a non-success response body to a Server error, falling back to
/// the status text when the body is not the structured shape.
pub(crate) fn server_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Server {
            status,
            message: envelope.error.message,
        },
        Err(_) => ApiError::Server {
            status,
            message: format!("backend returned HTTP {status}"),
        },
    }
}
