//! HTTP order log adapter.
//!
//! Orders are stored as a JSON array at `{host}/odr_{user_key}/{tag}`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::application::ports::{OrderLogError, OrderLogPort};
use crate::domain::orders::RawOrder;
use crate::domain::shared::OrderTag;
use crate::infrastructure::retry::{ErrorCategory, ExponentialBackoff, RetryConfig, categorize_status};

/// Configuration for the HTTP order log.
#[derive(Clone)]
pub struct OrderLogConfig {
    /// Base URL of the key-value store.
    pub host_url: String,
    /// Per-user key; collections are named `odr_{user_key}`.
    pub user_key: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl OrderLogConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(host_url: String, user_key: String) -> Self {
        Self {
            host_url,
            user_key,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
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
}

impl fmt::Debug for OrderLogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderLogConfig")
            .field("host_url", &self.host_url)
            .field("user_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// `OrderLogPort` backed by the remote key-value store.
#[derive(Debug, Clone)]
pub struct HttpOrderLogAdapter {
    client: Client,
    base_url: Url,
    collection: String,
    retry_config: RetryConfig,
}

impl HttpOrderLogAdapter {
    /// Create a new adapter.
    pub fn new(config: &OrderLogConfig) -> Result<Self, OrderLogError> {
        let base_url = Url::parse(&config.host_url).map_err(|e| OrderLogError::ConnectionError {
            message: format!("invalid order log URL {}: {e}", config.host_url),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OrderLogError::ConnectionError {
                message: format!("invalid order log URL {}", config.host_url),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OrderLogError::ConnectionError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            collection: format!("odr_{}", config.user_key),
            retry_config: config.retry.clone(),
        })
    }

    /// URL of the record for `tag`. The tag is percent-encoded as one segment.
    fn record_url(&self, tag: &OrderTag) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.collection)
                .push(tag.as_str());
        }
        url
    }

    /// Fetch the raw body, or `None` when the tag has no record.
    async fn fetch_body(&self, url: Url) -> Result<Option<String>, OrderLogError> {
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let response = match self.client.get(url.clone()).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt(),
                            "Order log network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(OrderLogError::ConnectionError {
                        message: e.to_string(),
                    });
                }
            };

            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }

            if status.is_success() {
                return response.text().await.map(Some).map_err(|e| {
                    OrderLogError::ConnectionError {
                        message: e.to_string(),
                    }
                });
            }

            let message = response.text().await.unwrap_or_default();

            match categorize_status(status) {
                ErrorCategory::RateLimited | ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            status = status.as_u16(),
                            delay_ms = delay.as_millis(),
                            "Order log retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }
                ErrorCategory::NonRetryable => {}
            }

            return Err(OrderLogError::HttpError {
                status: status.as_u16(),
                message,
            });
        }
    }
}

/// Decode a record body. Empty, `null` and non-array bodies hold no orders.
fn parse_orders(body: &str) -> Result<Vec<RawOrder>, OrderLogError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| OrderLogError::InvalidResponse {
        message: e.to_string(),
    })?;

    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| OrderLogError::InvalidResponse {
                message: e.to_string(),
            })
        }
        Value::Null => Ok(Vec::new()),
        other => {
            tracing::warn!(kind = json_kind(&other), "Order log record is not an array, ignoring");
            Ok(Vec::new())
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl OrderLogPort for HttpOrderLogAdapter {
    async fn fetch_persisted_orders(
        &self,
        tag: &OrderTag,
    ) -> Result<Vec<RawOrder>, OrderLogError> {
        let url = self.record_url(tag);
        tracing::debug!(order_tag = %tag, "Fetching persisted orders");

        let Some(body) = self.fetch_body(url).await? else {
            tracing::debug!(order_tag = %tag, "No order log record");
            return Ok(Vec::new());
        };

        let orders = parse_orders(&body)?;
        tracing::debug!(order_tag = %tag, count = orders.len(), "Persisted orders fetched");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(host: &str) -> HttpOrderLogAdapter {
        HttpOrderLogAdapter::new(&OrderLogConfig::new(host.to_string(), "u42".to_string())).unwrap()
    }

    #[test]
    fn record_url_layout() {
        let tag = OrderTag::parse("straddle1").unwrap();
        assert_eq!(
            adapter("https://db.example.com").record_url(&tag).as_str(),
            "https://db.example.com/odr_u42/straddle1"
        );
        assert_eq!(
            adapter("https://db.example.com/kv/").record_url(&tag).as_str(),
            "https://db.example.com/kv/odr_u42/straddle1"
        );
    }

    #[test]
    fn record_url_encodes_tag() {
        let tag = OrderTag::parse("a b/c").unwrap();
        assert_eq!(
            adapter("https://db.example.com").record_url(&tag).as_str(),
            "https://db.example.com/odr_u42/a%20b%2Fc"
        );
    }

    #[test]
    fn invalid_host_rejected() {
        let config = OrderLogConfig::new("not a url".to_string(), "u".to_string());
        assert!(HttpOrderLogAdapter::new(&config).is_err());
    }

    #[test]
    fn parse_empty_and_null_bodies() {
        assert!(parse_orders("").unwrap().is_empty());
        assert!(parse_orders("  \n").unwrap().is_empty());
        assert!(parse_orders("null").unwrap().is_empty());
        assert!(parse_orders("[]").unwrap().is_empty());
        assert!(parse_orders("{\"error\":\"x\"}").unwrap().is_empty());
    }

    #[test]
    fn parse_array_of_orders() {
        let body = r#"[{"order_id":1,"order_timestamp":"2024-09-20 09:15:00","transaction_type":"BUY","tag":"t","tradingsymbol":"NIFTY24SEP24000CE","quantity":50}]"#;
        let orders = parse_orders(body).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_key().as_deref(), Some("1"));
        assert_eq!(orders[0].get("quantity"), Some(&Value::from(50)));
    }

    #[test]
    fn parse_keeps_orders_that_would_not_decode() {
        let body = r#"[{"order_id":"1","order_timestamp":null,"tag":"other"}]"#;
        let orders = parse_orders(body).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].tag(), Some("other"));
    }

    #[test]
    fn parse_malformed_body_fails() {
        assert!(matches!(
            parse_orders("[{"),
            Err(OrderLogError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn debug_redacts_user_key() {
        let config = OrderLogConfig::new("https://db".to_string(), "secret-key".to_string());
        assert!(!format!("{config:?}").contains("secret-key"));
    }
}
