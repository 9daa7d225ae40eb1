//! Error taxonomy for heartbeat requests.
//!
//! Validation problems are caught before anything touches the network.
//! Everything that happens after the first transport attempt is reported as
//! an [`ApiError`] carrying a classified [`ErrorCode`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Malformed caller input. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("jobKey must be exactly 8 Base62 characters")]
    JobKey,
    #[error("status must be \"success\" or \"fail\" (got {0:?})")]
    EndStatus(String),
    #[error("progress seq must be a non-negative integer (got {0})")]
    NegativeSeq(i64),
}

/// Classified failure code reported in a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// HTTP 400.
    ValidationError,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Any other non-2xx status.
    UnknownError,
    /// The transport failed before an HTTP response was received.
    NetworkError,
    /// The request was abandoned through a cancel token.
    Cancelled,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of one logical request, after retries were exhausted or
/// the failure was not retryable.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    /// `None` when no HTTP response was received.
    pub http_status: Option<u16>,
    pub retryable: bool,
    pub message: String,
    /// Decoded response payload, when there was one.
    pub raw: Option<Map<String, Value>>,
}

impl ApiError {
    /// Any transport failure: no response, always worth repeating.
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NetworkError,
            http_status: None,
            retryable: true,
            message: message.into(),
            raw: None,
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self {
            code: ErrorCode::Cancelled,
            http_status: None,
            retryable: false,
            message: "request cancelled".to_string(),
            raw: None,
        }
    }
}

/// Error returned by [`PingClient`](crate::client::PingClient) operations.
#[derive(Debug, Error)]
pub enum PingError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The body could not be serialized. Client bodies are JSON maps and
    /// always encode; this only surfaces when
    /// [`RequestPipeline::execute`](crate::pipeline::RequestPipeline::execute)
    /// is driven with some other `Serialize` body.
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PingError {
    /// The classified code, when the failure came back from the pipeline.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            PingError::Api(e) => Some(e.code),
            PingError::Validation(_) | PingError::Encode(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, PingError::Api(e) if e.retryable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError {
            code: ErrorCode::NotFound,
            http_status: Some(404),
            retryable: false,
            message: "Job not found or disabled".into(),
            raw: None,
        };
        assert_eq!(err.to_string(), "NOT_FOUND: Job not found or disabled");
    }

    #[test]
    fn error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::RateLimited).unwrap();
        assert_eq!(json, "\"RATE_LIMITED\"");
        assert_eq!(ErrorCode::NetworkError.to_string(), "NETWORK_ERROR");
    }

    #[test]
    fn ping_error_exposes_code_and_retryable() {
        let err = PingError::from(ApiError::network("connection refused"));
        assert_eq!(err.code(), Some(ErrorCode::NetworkError));
        assert!(err.is_retryable());

        let err = PingError::from(ValidationError::NegativeSeq(-1));
        assert_eq!(err.code(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn encode_failure_has_no_code() {
        let json_err = serde_json::to_string(&std::collections::BTreeMap::from([((1, 2), 3)]))
            .unwrap_err();
        let err = PingError::from(json_err);
        assert!(matches!(err, PingError::Encode(_)));
        assert_eq!(err.code(), None);
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("failed to encode request payload"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PingError>();
    }
}
