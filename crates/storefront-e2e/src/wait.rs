//! Wait Mechanisms
//!
//! Every locator query, action and assertion is a bounded poll: probe, and
//! if the condition is not met yet, sleep one interval and probe again until
//! the deadline. Nothing here sleeps a fixed amount "just in case".
//!
//! ## Semantics
//!
//! - The condition is always evaluated at least once, even with a zero timeout
//! - Retryable errors ([`E2eError::is_retryable`]) count as "not yet"
//! - Any other error ends the wait immediately

use crate::result::{E2eError, E2eResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll `attempt` until it yields `Some`, or fail with
/// [`E2eError::ActionabilityTimeout`] naming `target` and `state`.
pub async fn poll_until<T, F, Fut>(
    target: &str,
    state: &str,
    options: &WaitOptions,
    mut attempt: F,
) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<Option<T>>>,
{
    let deadline = Instant::now() + options.timeout();
    let interval = options.poll_interval().max(Duration::from_millis(1));
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match attempt().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(err) if err.is_retryable() => {
                tracing::trace!(%err, selector = target, "retrying");
            }
            Err(err) => return Err(err),
        }

        let now = Instant::now();
        if now >= deadline {
            tracing::debug!(selector = target, state, attempts, "wait timed out");
            return Err(E2eError::ActionabilityTimeout {
                target: target.to_string(),
                state: state.to_string(),
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}

// =============================================================================
// TESTS
// =============================================================================
