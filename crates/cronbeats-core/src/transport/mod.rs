//! Synchronous HTTP transport.
//!
//! The pipeline only sees the [`Transport`] trait; [`CurlTransport`] is the
//! libcurl-backed implementation used by default. A transport either returns
//! an HTTP response (any status) or a [`TransportError`] when no response
//! was received at all.

mod easy;
mod parse;

pub use easy::CurlTransport;

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// One outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: &'static str,
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

/// Response as returned by the transport. Header names are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw body bytes; decoding is left to the pipeline.
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

/// Connection-level failure (DNS, refused connection, timeout, TLS...).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Curl(#[from] curl::Error),

    #[error("network error: {0}")]
    Other(String),
}

/// Executes one blocking HTTP request.
pub trait Transport: Send + Sync {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).request(req)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).request(req)
    }
}
