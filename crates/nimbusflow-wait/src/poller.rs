//! Bounded polling
//!
//! Runs a probe up to `floor(timeout / interval)` times with a fixed sleep in
//! between. The probe decides on every attempt whether the condition holds,
//! does not hold yet, or can no longer hold. Errors coming out of the probe are
//! never retried here.

use nimbusflow_cloud::ClientConfig;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Timing of one wait: how long to keep trying and how far apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSpec {
    timeout: Duration,
    interval: Duration,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitSpecError {
    #[error("wait timeout must be positive")]
    ZeroTimeout,

    #[error("wait interval must be positive")]
    ZeroInterval,
}

impl WaitSpec {
    pub fn new(timeout: Duration, interval: Duration) -> Result<Self, WaitSpecError> {
        if timeout.is_zero() {
            return Err(WaitSpecError::ZeroTimeout);
        }
        if interval.is_zero() {
            return Err(WaitSpecError::ZeroInterval);
        }
        Ok(Self { timeout, interval })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of probe invocations this spec allows (integer division)
    pub fn max_attempts(&self) -> u32 {
        let attempts = self.timeout.as_nanos() / self.interval.as_nanos();
        u32::try_from(attempts).unwrap_or(u32::MAX)
    }
}

impl TryFrom<&ClientConfig> for WaitSpec {
    type Error = WaitSpecError;

    fn try_from(config: &ClientConfig) -> Result<Self, Self::Error> {
        WaitSpec::new(config.operation_timeout(), config.wait_interval())
    }
}

/// Result of a single probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T, E> {
    /// Condition holds; carries whatever the probe fetched
    Satisfied(T),
    NotYetSatisfied,
    /// Condition cannot be decided or will never hold; ends the wait
    Failed(E),
}

impl<T, E> From<Result<Option<T>, E>> for PollOutcome<T, E> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(value)) => PollOutcome::Satisfied(value),
            Ok(None) => PollOutcome::NotYetSatisfied,
            Err(e) => PollOutcome::Failed(e),
        }
    }
}

/// The attempt budget ran out with the condition still unsatisfied
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Timed out after {attempts} attempts ({timeout:?})")]
pub struct TimeoutExceeded {
    pub attempts: u32,
    pub timeout: Duration,
}

/// Invoke `check` until it is satisfied, it fails, or the attempts run out.
///
/// # Returns
/// * `Ok(value)` - the probe reported `Satisfied(value)`
/// * `Err(e)` - the probe reported `Failed(e)`, returned unchanged
/// * `Err(TimeoutExceeded.into())` - `spec.max_attempts()` probes, none decisive
///
/// There is no sleep after the last attempt, and none before the first.
pub async fn wait_until<T, E, F, Fut>(spec: &WaitSpec, mut check: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollOutcome<T, E>>,
    E: From<TimeoutExceeded>,
{
    let max_attempts = spec.max_attempts();

    for attempt in 1..=max_attempts {
        match check().await {
            PollOutcome::Satisfied(value) => {
                tracing::debug!(attempt, max_attempts, "Wait condition satisfied");
                return Ok(value);
            }
            PollOutcome::Failed(e) => {
                tracing::debug!(attempt, max_attempts, "Probe failed, aborting wait");
                return Err(e);
            }
            PollOutcome::NotYetSatisfied => {
                tracing::trace!(attempt, max_attempts, "Wait condition not yet satisfied");
            }
        }

        if attempt < max_attempts {
            sleep(spec.interval).await;
        }
    }

    tracing::warn!(
        attempts = max_attempts,
        timeout = ?spec.timeout,
        "Gave up waiting"
    );
    Err(TimeoutExceeded {
        attempts: max_attempts,
        timeout: spec.timeout,
    }
    .into())
}
