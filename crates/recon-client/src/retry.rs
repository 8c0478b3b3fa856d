//! Linear backoff for rate-limited calls.

use std::time::Duration;

/// Linear backoff: the n-th rate-limited attempt waits `step * n`, never
/// more than `ceiling`. A server `Retry-After` longer than the computed
/// delay wins, still bounded by `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Rate-limited retries allowed before the call fails.
    pub max_retries: u32,
    pub step: Duration,
    pub ceiling: Duration,
}

impl BackoffPolicy {
    /// Delay before retrying after the `attempt`-th rate-limited response (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let linear = self.step.saturating_mul(attempt.max(1));
        let wanted = retry_after.map_or(linear, |server| server.max(linear));
        wanted.min(self.ceiling)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            step: Duration::from_secs(1),
            ceiling: Duration::from_secs(10),
        }
    }
}
