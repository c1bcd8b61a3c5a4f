//! Wait options for suspending operations.
//!
//! Every suspend-point (visibility waits, response waits) carries a timeout;
//! expiry fails with `Timeout` and propagates to the test. Operations are
//! attempted exactly once — there is no retry policy anywhere in the harness.

use std::time::Duration;

/// Default timeout for element waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for response waits (15 seconds)
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

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
    /// Create wait options with defaults
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_builders() {
        let opts = WaitOptions::new().with_timeout(500).with_poll_interval(10);
        assert_eq!(opts.timeout(), Duration::from_millis(500));
        assert_eq!(opts.poll_interval(), Duration::from_millis(10));
    }
}
