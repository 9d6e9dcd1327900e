//! Bounded retry with exponential backoff and jitter.
//!
//! Wraps a single fallible operation; only failures the error itself
//! reports as transient are retried. The jitter term spreads concurrent
//! workers' retries out so they don't hammer the same mirror in lockstep.

use std::time::Duration;

use rand::Rng;

use crate::facility::ExecError;

/// Errors that can say whether retrying might help.
pub trait TransientError {
    fn is_transient(&self) -> bool;
}

impl TransientError for ExecError {
    fn is_transient(&self) -> bool {
        ExecError::is_transient(self)
    }
}

/// An operation result annotated with how many attempts it took.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: Result<T, E>,
    /// Total attempts made, always at least 1.
    pub attempts: u32,
}

/// Retry configuration for one orchestration call.
///
/// Passed in explicitly; there is no process-wide retry state.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Backoff base; attempt N waits `base * 2^(N-1)` plus jitter.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    pub fn execute<T, E: TransientError>(
        &self,
        mut op: impl FnMut() -> Result<T, E>,
    ) -> RetryOutcome<T, E> {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => {
                    return RetryOutcome {
                        result: Ok(value),
                        attempts: attempt,
                    }
                }
                Err(err) if err.is_transient() && attempt < max => {
                    let delay = self.backoff_delay(attempt);
                    tracing::debug!(attempt, ?delay, "transient failure, backing off");
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => {
                    return RetryOutcome {
                        result: Err(err),
                        attempts: attempt,
                    }
                }
            }
        }
    }

    /// Delay before the retry following attempt `attempt` (1-based):
    /// `base * 2^(attempt-1)` plus uniform jitter in `[0, base)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        if base_ms == 0 {
            return Duration::ZERO;
        }
        let shift = (attempt.saturating_sub(1)).min(16);
        let backoff = base_ms.saturating_mul(1u64 << shift);
        let jitter = rand::thread_rng().gen_range(0..base_ms);
        Duration::from_millis(backoff.saturating_add(jitter))
    }
}
