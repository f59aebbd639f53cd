use crate::{
    DEFAULT_PROBE_ATTEMPT_TIMEOUT_MS, DEFAULT_PROBE_MAX_ATTEMPTS, DEFAULT_PROBE_RETRY_DELAY_MS,
};

use std::time::Duration;

/// Retry budget for a readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    /// Total attempts including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one
    pub retry_delay: Duration,
    /// Bound on a single attempt; `None` leaves it to the transport
    pub attempt_timeout: Option<Duration>,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_PROBE_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_PROBE_RETRY_DELAY_MS),
            attempt_timeout: Some(Duration::from_millis(DEFAULT_PROBE_ATTEMPT_TIMEOUT_MS)),
        }
    }
}

impl ProbePolicy {
    /// Time spent sleeping between attempts when every attempt fails.
    pub fn total_retry_delay(&self) -> Duration {
        self.retry_delay * self.max_attempts.max(1).saturating_sub(1)
    }

    /// Upper bound on a probe, if every attempt is bounded.
    pub fn worst_case(&self) -> Option<Duration> {
        self.attempt_timeout
            .map(|limit| limit * self.max_attempts.max(1) + self.total_retry_delay())
    }
}
