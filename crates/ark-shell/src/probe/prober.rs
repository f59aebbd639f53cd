//! Bounded-retry readiness polling.

use crate::{
    HttpTransport, ProbeOutcome, ProbePolicy, ProbeTarget, ProbeTransport, ShellError, ShellResult,
};

use std::sync::Arc;

use tracing::{debug, info, warn};

/// Polls a target until it answers HTTP or the attempt budget runs out.
///
/// Attempts are strictly sequential. Retries wait on a Tokio timer, so the
/// probe never blocks the runtime it is awaited on.
#[derive(Clone)]
pub struct ReadinessProber {
    transport: Arc<dyn ProbeTransport>,
}

impl ReadinessProber {
    pub fn new(transport: Arc<dyn ProbeTransport>) -> Self {
        Self { transport }
    }

    /// Prober over the reqwest-based HTTP transport.
    pub fn http() -> ShellResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    /// Probe `target` until any HTTP response arrives or `policy` is spent.
    pub async fn probe(&self, target: &ProbeTarget, policy: &ProbePolicy) -> ProbeOutcome {
        let max_attempts = policy.max_attempts.max(1);
        let mut remaining = max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.attempt(target, policy).await {
                Ok(status) => {
                    info!("Server at {target} responded with HTTP {status} (attempt {attempt}/{max_attempts})");
                    return ProbeOutcome::Ready {
                        attempts: attempt,
                        status,
                    };
                }
                Err(e) => {
                    remaining -= 1;
                    let last_error = failure_message(e);
                    debug!(
                        "Readiness attempt {attempt}/{max_attempts} for {target} failed: {last_error}"
                    );

                    if remaining == 0 {
                        warn!("Server at {target} did not respond after {attempt} attempts");
                        return ProbeOutcome::Exhausted {
                            attempts: attempt,
                            last_error,
                        };
                    }

                    if !policy.retry_delay.is_zero() {
                        tokio::time::sleep(policy.retry_delay).await;
                    }
                }
            }
        }
    }

    /// Like [`probe`](Self::probe), but exhaustion is an error.
    ///
    /// Returns the number of attempts it took.
    pub async fn wait_ready(&self, target: &ProbeTarget, policy: &ProbePolicy) -> ShellResult<u32> {
        match self.probe(target, policy).await {
            ProbeOutcome::Ready { attempts, .. } => Ok(attempts),
            ProbeOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(ShellError::readiness_exhausted(
                target.to_string(),
                attempts,
                last_error,
            )),
        }
    }

    async fn attempt(&self, target: &ProbeTarget, policy: &ProbePolicy) -> ShellResult<u16> {
        match policy.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.get(target))
                .await
                .unwrap_or_else(|_| {
                    Err(ShellError::transport(format!(
                        "no response within {}ms",
                        limit.as_millis()
                    )))
                }),
            None => self.transport.get(target).await,
        }
    }
}

fn failure_message(error: ShellError) -> String {
    match error {
        ShellError::Transport { message, .. } => message,
        other => other.to_string(),
    }
}
