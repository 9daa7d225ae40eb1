//! libcurl-backed transport.
//!
//! Uses a fresh `Easy` handle per request; nothing is pooled between calls.

use super::parse::parse_headers;
use super::{HttpRequest, HttpResponse, Transport, TransportError};
use curl::easy::{Easy, List};

/// Blocking transport on top of the curl crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for CurlTransport {
    /// Runs in the current thread.
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut easy = Easy::new();
        easy.url(&req.url)?;
        easy.connect_timeout(req.timeout)?;
        easy.timeout(req.timeout)?;

        if req.method.eq_ignore_ascii_case("POST") {
            easy.post(true)?;
            // Always send a body so libcurl never falls back to the read callback.
            easy.post_fields_copy(req.body.as_deref().unwrap_or("").as_bytes())?;
        } else {
            easy.custom_request(req.method)?;
            if let Some(body) = &req.body {
                easy.post_fields_copy(body.as_bytes())?;
            }
        }

        let mut list = List::new();
        for (name, value) in &req.headers {
            list.append(&format!("{}: {}", name.trim(), value.trim()))?;
        }
        // Suppress `Expect: 100-continue` round trips.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = std::str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let status = u16::try_from(code)
            .map_err(|_| TransportError::Other(format!("invalid HTTP status {code}")))?;
        tracing::trace!(url = %req.url, status, bytes = body.len(), "http response");

        Ok(HttpResponse {
            status,
            body,
            headers: parse_headers(&header_lines),
        })
    }
}
