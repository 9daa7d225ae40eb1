//! Client library for the CronBeats job heartbeat service.
//!
//! [`PingClient`] validates input, then hands each request to the
//! [`RequestPipeline`](pipeline::RequestPipeline), which retries transient
//! failures and returns either a normalized result or a classified error.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod job_key;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod retry;
pub mod transport;

#[cfg(test)]
mod testing;

pub use action::{EndStatus, ProgressArgs, RequestAction};
pub use client::PingClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorCode, PingError, ValidationError};
pub use job_key::JobKey;
pub use normalize::PingResult;
pub use pipeline::Outcome;
