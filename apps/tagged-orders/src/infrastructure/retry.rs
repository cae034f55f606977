//! Retry policy shared by the outbound HTTP adapters.

use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;

/// How often and how patiently an outbound call is retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts in total, the first one included.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound on any single delay.
    pub max_backoff: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
    /// Relative jitter applied to each delay (0.1 = up to 10% either way).
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// One attempt, never retried.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Retry treatment of an upstream HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 429; the server may say how long to wait.
    RateLimited,
    /// Request timeout or a transient gateway/server failure.
    Retryable,
    /// Retrying would not change the answer.
    NonRetryable,
}

/// Classify an error status.
#[must_use]
pub const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Delays between attempts of one outbound call.
///
/// The n-th retry waits `initial_backoff * multiplier^(n-1)`, capped at
/// `max_backoff`, then jittered.
#[derive(Debug)]
pub struct ExponentialBackoff {
    policy: RetryConfig,
    attempt: u32,
}

impl ExponentialBackoff {
    /// Start counting attempts for a new call.
    #[must_use]
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            policy: config.clone(),
            attempt: 0,
        }
    }

    /// Attempts recorded so far.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a failed attempt and return how long to wait before the next
    /// one, or `None` once the attempt budget is spent.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.policy.max_attempts {
            return None;
        }

        let exponent = i32::try_from(self.attempt - 1).unwrap_or(i32::MAX);
        #[allow(clippy::cast_precision_loss)]
        let base_ms = self.policy.initial_backoff.as_millis() as f64;
        #[allow(clippy::cast_precision_loss)]
        let cap_ms = self.policy.max_backoff.as_millis() as f64;
        let delay_ms = (base_ms * self.policy.multiplier.powi(exponent)).min(cap_ms);

        Some(millis(self.jitter(delay_ms)))
    }

    fn jitter(&self, delay_ms: f64) -> f64 {
        let spread = self.policy.jitter_factor;
        if spread <= 0.0 {
            return delay_ms;
        }
        let factor = 1.0 + rand::rng().random_range(-spread..=spread);
        (delay_ms * factor).max(1.0)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millis(value: f64) -> Duration {
    Duration::from_millis(value.round() as u64)
}
