//! Request pipeline: one logical heartbeat request, including retries.
//!
//! Turns whatever the transport produces into an [`Outcome`]: a normalized
//! success, or a classified failure once retries are exhausted or the
//! failure is not retryable. Each call keeps its own attempt counter and
//! cancel token; the pipeline itself holds only immutable settings.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::job_key::JobKey;
use crate::normalize::{normalize, PingResult};
use crate::retry::{
    classify_http_status, BackoffPolicy, CancelToken, Sleeper,
    ThreadSleeper,
};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use serde::Serialize;
use serde_json::{Map, Value};

const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";
const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Final result of one logical request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(PingResult),
    Failure(ApiError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn into_result(self) -> Result<PingResult, ApiError> {
        match self {
            Outcome::Success(result) => Ok(result),
            Outcome::Failure(err) => Err(err),
        }
    }
}

pub struct RequestPipeline {
    key: JobKey,
    config: ClientConfig,
    backoff: BackoffPolicy,
    transport: Box<dyn Transport>,
    sleeper: Box<dyn Sleeper>,
}

impl RequestPipeline {
    pub fn new(key: JobKey, config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let config = config.normalized();
        let backoff = BackoffPolicy::new(config.retry_backoff_ms, config.retry_jitter_ms);
        Self {
            key,
            config,
            backoff,
            transport: Box::new(transport),
            sleeper: Box::new(ThreadSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn job_key(&self) -> &JobKey {
        &self.key
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `POST {base_url}{path}` until it succeeds, fails terminally, or
    /// `max_retries` retries have been spent.
    ///
    /// The only error is a body that cannot be encoded (e.g. a map with
    /// non-string keys), reported before any transport call. A body that encodes to `null` or `{}` is not sent.
    pub fn execute<B>(
        &self,
        action: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Outcome, serde_json::Error>
    where
        B: Serialize + ?Sized,
    {
        self.execute_with_cancel(action, path, body, &CancelToken::new())
    }

    /// Like [`execute`](Self::execute), abandoning the call with `CANCELLED`
    /// once `cancel` fires. The token only affects this call.
    pub fn execute_with_cancel<B>(
        &self,
        action: &str,
        path: &str,
        body: Option<&B>,
        cancel: &CancelToken,
    ) -> Result<Outcome, serde_json::Error>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest {
            method: "POST",
            url: format!("{}{}", self.config.base_url, path),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), self.config.user_agent.clone()),
            ],
            body: encode_body(body)?,
            timeout: self.config.timeout(),
        };
        Ok(self.run(action, &request, cancel))
    }

    fn run(&self, action: &str, request: &HttpRequest, cancel: &CancelToken) -> Outcome {
        let max_retries = self.config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::debug!(action, attempt, "request cancelled");
                return Outcome::Failure(ApiError::cancelled());
            }

            let response = match self.transport.request(request) {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_retries {
                        tracing::debug!(action, attempt, error = %err, "transport failed, giving up");
                        return Outcome::Failure(ApiError::network(err.to_string()));
                    }
                    tracing::warn!(action, attempt, error = %err, "transport failed, retrying");
                    attempt += 1;
                    if self.wait(attempt, cancel) {
                        return Outcome::Failure(ApiError::cancelled());
                    }
                    continue;
                }
            };

            let HttpResponse { status, body, .. } = response;
            let payload = decode_payload(&body);

            if (200..300).contains(&status) {
                tracing::debug!(action, attempt, status, "heartbeat accepted");
                return Outcome::Success(normalize(action, &self.key, payload));
            }

            let class = classify_http_status(status);
            if class.retryable && attempt < max_retries {
                tracing::warn!(action, attempt, status, code = %class.code, "request failed, retrying");
                attempt += 1;
                if self.wait(attempt, cancel) {
                    return Outcome::Failure(ApiError::cancelled());
                }
                continue;
            }

            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                .to_string();
            tracing::debug!(action, attempt, status, code = %class.code, "request failed");
            return Outcome::Failure(ApiError {
                code: class.code,
                http_status: Some(status),
                retryable: class.retryable,
                message,
                raw: Some(payload),
            });
        }
    }

    /// Backoff before `attempt`; returns true if cancelled meanwhile.
    fn wait(&self, attempt: u32, cancel: &CancelToken) -> bool {
        let delay = self.backoff.delay(attempt);
        tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off");
        self.sleeper.sleep(delay, cancel);
        cancel.is_cancelled()
    }
}

fn encode_body<B>(body: Option<&B>) -> Result<Option<String>, serde_json::Error>
where
    B: Serialize + ?Sized,
{
    let Some(body) = body else {
        return Ok(None);
    };
    let value = serde_json::to_value(body)?;
    match &value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => serde_json::to_string(&value).map(Some),
    }
}

/// Decode a response body as a JSON object, substituting a stock message
/// for anything else (including malformed UTF-8).
fn decode_payload(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert(
                "message".to_string(),
                Value::String(INVALID_JSON_MESSAGE.to_string()),
            );
            map
        }
    }
}
