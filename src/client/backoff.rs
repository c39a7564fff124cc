//! # Exponential Backoff
//!
//! Delay calculator for transport retries.
//!
//! Each delay doubles the previous one, starting from a base delay, and is
//! capped at a maximum. With the default settings (1s base, 12s cap) the
//! sequence is 1s, 2s, 4s, 8s, 12s, 12s, ...
//!
//! ## Usage
//!
//! ```rust
//! use confluent_cloud::client::ExponentialBackoff;
//! use std::time::Duration;
//!
//! let mut backoff = ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(12));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(1));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(2));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(4));
//! ```

use std::time::Duration;

/// Exponential backoff calculator
///
/// Holds per-request state; a new instance is created for every transport request.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// First delay returned
    base: Duration,
    /// Upper bound for any single delay
    max: Duration,
    /// Number of delays handed out so far
    attempt: u32,
}

impl ExponentialBackoff {
    #[must_use]
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            attempt: 0,
        }
    }

    /// Get the next backoff duration and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let factor = 2u32.saturating_pow(self.attempt);
        self.attempt = self.attempt.saturating_add(1);
        self.base.saturating_mul(factor).min(self.max)
    }

    /// Upper bound applied to every delay, including server-suggested ones
    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }
}
