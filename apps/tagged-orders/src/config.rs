//! Service Configuration
//!
//! Loaded from environment variables (a `.env` file is read by the binary).
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `KITE_API_KEY` | yes | |
//! | `KITE_ACCESS_TOKEN` | yes | |
//! | `ORDER_LOG_HOST_URL` | yes | |
//! | `ORDER_LOG_USER_KEY` | yes | |
//! | `KITE_BASE_URL` | no | `https://api.kite.trade` |
//! | `KITE_INSTRUMENTS_SEGMENT` | no | `NFO` |
//! | `INDEX_UNDERLYINGS` | no | `NIFTY,BANKNIFTY,FINNIFTY,MIDCPNIFTY` |
//! | `HTTP_PORT` | no | `8080` |
//! | `METRICS_PORT` | no | `0` (disabled) |
//! | `HTTP_TIMEOUT_SECS` | no | `30` |
//! | `SERVICE_API_TOKEN` | no | unset (no auth) |

use std::fmt;
use std::time::Duration;

use crate::infrastructure::broker::kite::{DEFAULT_KITE_BASE_URL, KiteConfig};
use crate::infrastructure::instruments::DEFAULT_INDEX_UNDERLYINGS;
use crate::infrastructure::order_log::OrderLogConfig;

/// Kite Connect credentials.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    access_token: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, access_token: String) -> Self {
        Self {
            api_key,
            access_token,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Server port settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// REST API port.
    pub http_port: u16,
    /// Prometheus metrics port (0 = disabled).
    pub metrics_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            http_port: 8080,
            metrics_port: 0,
        }
    }
}

/// Complete service configuration.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Kite credentials.
    pub credentials: Credentials,
    /// Kite API base URL.
    pub kite_base_url: String,
    /// Exchange segment of the instruments dump.
    pub instruments_segment: String,
    /// Underlyings kept from the instruments dump.
    pub index_underlyings: Vec<String>,
    /// Order log base URL.
    pub order_log_host_url: String,
    /// Order log user key.
    pub order_log_user_key: String,
    /// Server port settings.
    pub server: ServerSettings,
    /// Outbound HTTP timeout.
    pub http_timeout: Duration,
    /// Bearer token for API routes.
    pub api_token: Option<String>,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("credentials", &self.credentials)
            .field("kite_base_url", &self.kite_base_url)
            .field("instruments_segment", &self.instruments_segment)
            .field("index_underlyings", &self.index_underlyings)
            .field("order_log_host_url", &self.order_log_host_url)
            .field("order_log_user_key", &"[REDACTED]")
            .field("server", &self.server)
            .field("http_timeout", &self.http_timeout)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, "KITE_API_KEY")?;
        let access_token = required(&lookup, "KITE_ACCESS_TOKEN")?;
        let order_log_host_url = required(&lookup, "ORDER_LOG_HOST_URL")?;
        let order_log_user_key = required(&lookup, "ORDER_LOG_USER_KEY")?;

        let kite_base_url = optional(&lookup, "KITE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_KITE_BASE_URL.to_string());

        let instruments_segment =
            optional(&lookup, "KITE_INSTRUMENTS_SEGMENT").unwrap_or_else(|| "NFO".to_string());

        let index_underlyings = optional(&lookup, "INDEX_UNDERLYINGS").map_or_else(
            || DEFAULT_INDEX_UNDERLYINGS.iter().map(|s| (*s).to_string()).collect(),
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_uppercase)
                    .collect()
            },
        );

        let server = ServerSettings {
            http_port: parse_env_u16(&lookup, "HTTP_PORT", ServerSettings::default().http_port),
            metrics_port: parse_env_u16(
                &lookup,
                "METRICS_PORT",
                ServerSettings::default().metrics_port,
            ),
        };

        let http_timeout =
            parse_env_duration_secs(&lookup, "HTTP_TIMEOUT_SECS", Duration::from_secs(30));

        Ok(Self {
            credentials: Credentials::new(api_key, access_token),
            kite_base_url,
            instruments_segment,
            index_underlyings,
            order_log_host_url,
            order_log_user_key,
            server,
            http_timeout,
            api_token: optional(&lookup, "SERVICE_API_TOKEN"),
        })
    }

    /// Kite adapter configuration.
    #[must_use]
    pub fn kite_config(&self) -> KiteConfig {
        KiteConfig::new(
            self.credentials.api_key().to_string(),
            self.credentials.access_token().to_string(),
        )
        .with_base_url(self.kite_base_url.clone())
        .with_timeout(self.http_timeout)
    }

    /// Order log adapter configuration.
    #[must_use]
    pub fn order_log_config(&self) -> OrderLogConfig {
        OrderLogConfig::new(
            self.order_log_host_url.clone(),
            self.order_log_user_key.clone(),
        )
        .with_timeout(self.http_timeout)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_env_u16<F>(lookup: &F, key: &str, default: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}
