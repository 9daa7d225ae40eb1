use rand::Rng;
use std::time::Duration;

/// Exponential backoff with additive random jitter.
///
/// The delay before retry `attempt` (1-based) is
/// `backoff * 2^(attempt-1) + uniform(0..=jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Base delay in milliseconds.
    pub backoff_ms: u64,
    /// Upper bound of the random jitter in milliseconds (inclusive).
    pub jitter_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            backoff_ms: 250,
            jitter_ms: 100,
        }
    }
}

impl BackoffPolicy {
    pub fn new(backoff_ms: u64, jitter_ms: u64) -> Self {
        Self {
            backoff_ms,
            jitter_ms,
        }
    }

    /// Deterministic part of the delay. Attempt 0 is treated as 1.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(63);
        let factor = 1u64.checked_shl(exp).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }

    /// Delay with an explicit jitter value; `jitter_ms` is clamped to the
    /// configured bound.
    pub fn delay_with_jitter(&self, attempt: u32, jitter_ms: u64) -> Duration {
        self.base_delay(attempt)
            .saturating_add(Duration::from_millis(jitter_ms.min(self.jitter_ms)))
    }

    /// Delay with jitter drawn from the thread-local RNG.
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(0..=self.jitter_ms);
        self.delay_with_jitter(attempt, jitter)
    }
}
