//! HTTP client wrapper with retry logic.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::{KiteEnvelope, KiteErrorResponse};
use super::config::KiteConfig;
use super::error::KiteError;
use crate::infrastructure::retry::{ErrorCategory, ExponentialBackoff, RetryConfig, categorize_status};

/// Kite Connect API version header value.
const KITE_VERSION: &str = "3";

/// HTTP client for the Kite Connect API with retry logic.
#[derive(Clone)]
pub struct KiteHttpClient {
    client: Client,
    authorization: String,
    base_url: String,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for KiteHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KiteHttpClient")
            .field("base_url", &self.base_url)
            .field("retry_config", &self.retry_config)
            .finish_non_exhaustive()
    }
}

impl KiteHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &KiteConfig) -> Result<Self, KiteError> {
        if config.api_key.is_empty() || config.access_token.is_empty() {
            return Err(KiteError::AuthenticationFailed(
                "api_key and access_token are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| KiteError::Http(e.to_string()))?;

        Ok(Self {
            client,
            authorization: config.authorization(),
            base_url: config.base_url.clone(),
            retry_config: config.retry.clone(),
        })
    }

    /// GET a JSON endpoint and unwrap the `data` field of the envelope.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, KiteError> {
        let body = self.get_text(path).await?;
        let envelope: KiteEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| KiteError::JsonParse(e.to_string()))?;

        if !envelope.is_success() {
            return Err(KiteError::Api {
                error_type: envelope.error_type.unwrap_or_else(|| "UnknownException".to_string()),
                message: envelope.message.unwrap_or_default(),
            });
        }

        envelope
            .data
            .ok_or_else(|| KiteError::JsonParse(format!("missing data in response to {path}")))
    }

    /// GET an endpoint and return the raw body (e.g. the instruments CSV).
    pub async fn get_text(&self, path: &str) -> Result<String, KiteError> {
        let url = format!("{}{path}", self.base_url);
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let request = self
                .client
                .get(&url)
                .header("X-Kite-Version", KITE_VERSION)
                .header("Authorization", &self.authorization);

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt(),
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if backoff.attempt() <= 1 {
                        return Err(KiteError::Network(e.to_string()));
                    }
                    return Err(KiteError::MaxRetriesExceeded {
                        attempts: backoff.attempt(),
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                return response
                    .text()
                    .await
                    .map_err(|e| KiteError::Network(e.to_string()));
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();

            let (error_type, error_message) =
                match serde_json::from_str::<KiteErrorResponse>(&error_body) {
                    Ok(err) => (
                        err.error_type.unwrap_or_else(|| status.as_u16().to_string()),
                        err.message.unwrap_or_default(),
                    ),
                    Err(_) => (status.as_u16().to_string(), error_body),
                };

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let delay = backoff
                        .next_backoff()
                        .map(|d| retry_after.map_or(d, Duration::from_secs));
                    if let Some(delay) = delay {
                        tracing::warn!(
                            error_type = %error_type,
                            delay_ms = delay.as_millis(),
                            "Rate limited, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(KiteError::RateLimited {
                        retry_after_secs: retry_after.unwrap_or(1),
                    });
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error_type = %error_type,
                            message = %error_message,
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(KiteError::MaxRetriesExceeded {
                        attempts: backoff.attempt(),
                    });
                }
                ErrorCategory::NonRetryable => {
                    return match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            Err(KiteError::AuthenticationFailed(error_message))
                        }
                        _ if error_type == "TokenException" => {
                            Err(KiteError::AuthenticationFailed(error_message))
                        }
                        _ => Err(KiteError::Api {
                            error_type,
                            message: error_message,
                        }),
                    };
                }
            }
        }
    }
}
