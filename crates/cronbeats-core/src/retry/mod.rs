//! Retry policy: failure classification, backoff, waiting and cancellation.
//!
//! The request pipeline combines these pieces; they carry no per-call state
//! of their own.

mod cancel;
mod classify;
mod policy;
mod sleep;

pub use cancel::CancelToken;
pub use classify::{classify_http_status, Classification};
pub use policy::BackoffPolicy;
pub use sleep::{Sleeper, ThreadSleeper};
