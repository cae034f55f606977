//! Kite adapter configuration.

use std::fmt;
use std::time::Duration;

use crate::infrastructure::retry::RetryConfig;

/// Production Kite Connect endpoint.
pub const DEFAULT_KITE_BASE_URL: &str = "https://api.kite.trade";

/// Configuration for the Kite adapters.
#[derive(Clone)]
pub struct KiteConfig {
    /// API key of the Kite Connect app.
    pub api_key: String,
    /// Access token of the trading session.
    pub access_token: String,
    /// API base URL (no trailing slash).
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl KiteConfig {
    /// Create a new configuration against the production endpoint.
    #[must_use]
    pub fn new(api_key: String, access_token: String) -> Self {
        Self {
            api_key,
            access_token,
            base_url: DEFAULT_KITE_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("token {}:{}", self.api_key, self.access_token)
    }
}

impl fmt::Debug for KiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KiteConfig")
            .field("api_key", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}
