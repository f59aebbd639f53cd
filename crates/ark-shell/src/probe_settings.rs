use crate::{
    DEFAULT_PROBE_ATTEMPT_TIMEOUT_MS, DEFAULT_PROBE_MAX_ATTEMPTS, DEFAULT_PROBE_RETRY_DELAY_MS,
    ProbePolicy, ShellError, ShellResult,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    /// Upper bound for a single attempt (0 = no limit)
    pub attempt_timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_PROBE_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_PROBE_RETRY_DELAY_MS,
            attempt_timeout_ms: DEFAULT_PROBE_ATTEMPT_TIMEOUT_MS,
        }
    }
}

impl ProbeSettings {
    pub fn validate(&self) -> ShellResult<()> {
        if self.max_attempts == 0 {
            return Err(ShellError::config_invalid(
                "probe.max_attempts must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn policy(&self) -> ProbePolicy {
        let attempt_timeout =
            (self.attempt_timeout_ms > 0).then(|| Duration::from_millis(self.attempt_timeout_ms));

        ProbePolicy {
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            attempt_timeout,
        }
    }
}
