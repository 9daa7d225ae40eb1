//! Heartbeat actions, per-call input validation and request paths.

use crate::error::ValidationError;
use crate::job_key::JobKey;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Longest progress message the service accepts; longer ones are cut.
pub const MAX_PROGRESS_MESSAGE_CHARS: usize = 255;

/// Final status reported by an `end` heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndStatus {
    Success,
    Fail,
}

impl EndStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EndStatus::Success => "success",
            EndStatus::Fail => "fail",
        }
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for EndStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(EndStatus::Success),
            "fail" => Ok(EndStatus::Fail),
            _ => Err(ValidationError::EndStatus(s.to_string())),
        }
    }
}

impl fmt::Display for EndStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments accepted by a progress heartbeat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgressArgs {
    #[default]
    NoArgs,
    /// A bare sequence number; also sent as `progress` in the body.
    SeqOnly(i64),
    Options {
        seq: Option<i64>,
        message: Option<String>,
    },
}

/// Validated progress arguments, ready to become a path and a body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRequest {
    pub seq: Option<u64>,
    pub body: Map<String, Value>,
}

impl ProgressArgs {
    /// Check the sequence number and clamp the message length.
    pub fn resolve(self) -> Result<ProgressRequest, ValidationError> {
        let (seq, message, bare) = match self {
            ProgressArgs::NoArgs => (None, None, false),
            ProgressArgs::SeqOnly(seq) => (Some(seq), None, true),
            ProgressArgs::Options { seq, message } => (seq, message, false),
        };

        let seq = seq
            .map(|s| u64::try_from(s).map_err(|_| ValidationError::NegativeSeq(s)))
            .transpose()?;

        let mut body = Map::new();
        body.insert(
            "message".to_string(),
            Value::String(truncate_message(message.unwrap_or_default())),
        );
        if let (true, Some(seq)) = (bare, seq) {
            body.insert("progress".to_string(), json!(seq));
        }

        Ok(ProgressRequest { seq, body })
    }
}

fn truncate_message(mut message: String) -> String {
    if let Some((idx, _)) = message.char_indices().nth(MAX_PROGRESS_MESSAGE_CHARS) {
        message.truncate(idx);
    }
    message
}

/// One heartbeat request kind, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Ping,
    Start,
    End(EndStatus),
    Progress { seq: Option<u64> },
}

impl RequestAction {
    /// Name reported back in the normalized result.
    pub fn name(&self) -> &'static str {
        match self {
            RequestAction::Ping => "ping",
            RequestAction::Start => "start",
            RequestAction::End(_) => "end",
            RequestAction::Progress { .. } => "progress",
        }
    }

    pub fn path(&self, key: &JobKey) -> String {
        match self {
            RequestAction::Ping => format!("/ping/{key}"),
            RequestAction::Start => format!("/ping/{key}/start"),
            RequestAction::End(status) => format!("/ping/{key}/end/{status}"),
            RequestAction::Progress { seq: None } => format!("/ping/{key}/progress"),
            RequestAction::Progress { seq: Some(seq) } => format!("/ping/{key}/progress/{seq}"),
        }
    }
}
