//! Normalize a successful response payload into a [`PingResult`].

use crate::job_key::JobKey;
use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized result of a successful heartbeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    /// Always true; kept so serialized results match failure shapes.
    pub ok: bool,
    pub action: String,
    pub job_key: String,
    pub timestamp: String,
    pub processing_time_ms: f64,
    pub next_expected: Option<String>,
    /// Full decoded payload.
    pub raw: Map<String, Value>,
}

/// Build a [`PingResult`] from the wire payload, filling gaps from the request.
pub fn normalize(action: &str, key: &JobKey, payload: Map<String, Value>) -> PingResult {
    PingResult {
        ok: true,
        action: string_field(&payload, "action").unwrap_or_else(|| action.to_string()),
        job_key: string_field(&payload, "job_key").unwrap_or_else(|| key.to_string()),
        timestamp: string_field(&payload, "timestamp").unwrap_or_default(),
        processing_time_ms: payload
            .get("processing_time_ms")
            .and_then(number_field)
            .unwrap_or(0.0),
        next_expected: string_field(&payload, "next_expected"),
        raw: payload,
    }
}

/// Strings are taken as-is, numbers and booleans stringified; null and
/// structured values count as absent.
fn string_field(payload: &Map<String, Value>, name: &str) -> Option<String> {
    match payload.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
