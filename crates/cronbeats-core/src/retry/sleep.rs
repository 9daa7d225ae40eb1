//! Blocking waits between retry attempts.

use super::cancel::CancelToken;
use std::time::Duration;

/// Performs the backoff pause. Implementations must return early once
/// `cancel` is cancelled.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration, cancel: &CancelToken);
}

impl<T: Sleeper + ?Sized> Sleeper for std::sync::Arc<T> {
    fn sleep(&self, duration: Duration, cancel: &CancelToken) {
        (**self).sleep(duration, cancel)
    }
}

/// Blocks the calling thread; woken early by cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancelToken) {
        cancel.wait_timeout(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn thread_sleeper_waits() {
        let started = Instant::now();
        ThreadSleeper.sleep(Duration::from_millis(30), &CancelToken::new());
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn thread_sleeper_returns_immediately_when_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let started = Instant::now();
        ThreadSleeper.sleep(Duration::from_secs(60), &token);
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
