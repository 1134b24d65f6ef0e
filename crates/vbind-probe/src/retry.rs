//! Exponential backoff for version probing.

use std::time::Duration;

/// How often and how patiently the detector retries a failing probe.
///
/// The attempt budget always allows at least one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    exponential_base: f64,
}

impl RetryPolicy {
    /// Creates a new retry policy with a backoff base of 2.
    ///
    /// `max_attempts` is raised to 1 if zero.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
            exponential_base: 2.0,
        }
    }

    /// A single attempt, no retries.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            exponential_base: 2.0,
        }
    }

    /// Set the base for exponential backoff.
    ///
    /// Bases below 1 are raised to 1 (constant delay).
    #[must_use]
    pub fn with_exponential_base(mut self, base: f64) -> Self {
        self.exponential_base = base.max(1.0);
        self
    }

    /// Total number of attempts, including the first one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the first retry.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Upper bound for the delay between retries.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Delay to wait before the given attempt (0-indexed).
    ///
    /// Zero for the first attempt, then `initial_delay * base^(attempt - 1)`
    /// capped at `max_delay`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let base_delay_ms =
            self.initial_delay.as_millis() as f64 * self.exponential_base.powi(exponent);
        let capped_delay_ms = base_delay_ms.min(self.max_delay.as_millis() as f64);

        Duration::from_millis(capped_delay_ms.max(0.0) as u64)
    }

    /// Returns true if another attempt is allowed after `attempts_made`.
    #[must_use]
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200), Duration::from_secs(5))
    }
}
