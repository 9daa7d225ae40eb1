//! Public heartbeat client.

use crate::action::{EndStatus, ProgressArgs, RequestAction};
use crate::config::ClientConfig;
use crate::error::PingError;
use crate::job_key::JobKey;
use crate::normalize::PingResult;
use crate::pipeline::{Outcome, RequestPipeline};
use crate::retry::{CancelToken, Sleeper};
use crate::transport::{CurlTransport, Transport};
use serde_json::{Map, Value};

/// Reports lifecycle events for one job.
///
/// ```no_run
/// use cronbeats_core::{ClientConfig, PingClient};
///
/// let client = PingClient::new("abc123de", ClientConfig::default())?;
/// client.start()?;
/// // ... do the work ...
/// client.success()?;
/// # Ok::<(), cronbeats_core::PingError>(())
/// ```
pub struct PingClient {
    pipeline: RequestPipeline,
}

impl PingClient {
    /// Validate `job_key` and build a client on the curl transport.
    pub fn new(job_key: &str, config: ClientConfig) -> Result<Self, PingError> {
        Self::with_transport(job_key, config, CurlTransport::new())
    }

    pub fn with_transport(
        job_key: &str,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, PingError> {
        let key = JobKey::parse(job_key)?;
        Ok(Self {
            pipeline: RequestPipeline::new(key, config, transport),
        })
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.pipeline = self.pipeline.with_sleeper(sleeper);
        self
    }

    pub fn job_key(&self) -> &JobKey {
        self.pipeline.job_key()
    }

    pub fn config(&self) -> &ClientConfig {
        self.pipeline.config()
    }

    pub fn ping(&self) -> Result<PingResult, PingError> {
        self.call(RequestAction::Ping, None)
    }

    pub fn start(&self) -> Result<PingResult, PingError> {
        self.call(RequestAction::Start, None)
    }

    /// Report the end of a run; `status` must be "success" or "fail" in any
    /// case, surrounding whitespace ignored.
    pub fn end(&self, status: &str) -> Result<PingResult, PingError> {
        let status: EndStatus = status.parse()?;
        self.call(RequestAction::End(status), None)
    }

    pub fn success(&self) -> Result<PingResult, PingError> {
        self.call(RequestAction::End(EndStatus::Success), None)
    }

    pub fn fail(&self) -> Result<PingResult, PingError> {
        self.call(RequestAction::End(EndStatus::Fail), None)
    }

    /// Report progress. Messages over 255 characters are truncated.
    pub fn progress(&self, args: ProgressArgs) -> Result<PingResult, PingError> {
        let req = args.resolve()?;
        self.call(RequestAction::Progress { seq: req.seq }, Some(&req.body))
    }

    /// Run `action` and return the raw outcome instead of converting a
    /// failure into an error.
    pub fn send(
        &self,
        action: RequestAction,
        body: Option<&Map<String, Value>>,
    ) -> Result<Outcome, PingError> {
        self.send_with_cancel(action, body, &CancelToken::new())
    }

    /// Like [`send`](Self::send), giving up with `CANCELLED` once `cancel`
    /// fires. Only this call observes the token.
    pub fn send_with_cancel(
        &self,
        action: RequestAction,
        body: Option<&Map<String, Value>>,
        cancel: &CancelToken,
    ) -> Result<Outcome, PingError> {
        let path = action.path(self.pipeline.job_key());
        Ok(self
            .pipeline
            .execute_with_cancel(action.name(), &path, body, cancel)?)
    }

    fn call(
        &self,
        action: RequestAction,
        body: Option<&Map<String, Value>>,
    ) -> Result<PingResult, PingError> {
        Ok(self.send(action, body)?.into_result()?)
    }
}
