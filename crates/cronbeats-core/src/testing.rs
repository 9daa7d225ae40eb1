//! Test doubles for the transport and the backoff sleeper.

use crate::retry::{CancelToken, Sleeper};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

type Responder = dyn Fn(usize) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure keyed by call index and records
/// every request it receives.
pub(crate) struct ScriptedTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(usize) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Same JSON response for every call.
    pub(crate) fn always(status: u16, body: Value) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(json_response(status, body.as_str())))
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(req.clone());
            calls.len() - 1
        };
        (self.responder)(index)
    }
}

pub(crate) fn json_response(status: u16, body: impl Into<Vec<u8>>) -> HttpResponse {
    HttpResponse {
        status,
        body: body.into(),
        headers: [("content-type".to_string(), "application/json".to_string())].into(),
    }
}

/// Records requested backoff durations instead of sleeping. Optionally
/// cancels the waiting call's token on the n-th wait.
#[derive(Default)]
pub(crate) struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
    cancel_on: Option<usize>,
}

impl RecordingSleeper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancelling_on(wait_index: usize) -> Self {
        Self {
            waits: Mutex::new(Vec::new()),
            cancel_on: Some(wait_index),
        }
    }

    pub(crate) fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancelToken) {
        let mut waits = self.waits.lock().unwrap();
        if self.cancel_on == Some(waits.len()) {
            cancel.cancel();
        }
        waits.push(duration);
    }
}
