//! Classify non-2xx HTTP statuses into error codes. Transport failures need
//! no table: they are always a retryable `NETWORK_ERROR`.

use crate::error::ErrorCode;

/// Error code plus whether the request is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub code: ErrorCode,
    pub retryable: bool,
}

impl Classification {
    const fn new(code: ErrorCode, retryable: bool) -> Self {
        Self { code, retryable }
    }
}

/// Classify a non-2xx HTTP status.
pub fn classify_http_status(status: u16) -> Classification {
    match status {
        400 => Classification::new(ErrorCode::ValidationError, false),
        404 => Classification::new(ErrorCode::NotFound, false),
        429 => Classification::new(ErrorCode::RateLimited, true),
        500.. => Classification::new(ErrorCode::ServerError, true),
        _ => Classification::new(ErrorCode::UnknownError, false),
    }
}
