//! Kite-specific error types.

use thiserror::Error;

use crate::application::ports::{BrokerError, InstrumentReferenceError};

/// Errors from the Kite adapters.
#[derive(Debug, Error, Clone)]
pub enum KiteError {
    /// HTTP client could not be built or the request failed outright.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned an error envelope.
    #[error("API error: {error_type} - {message}")]
    Api {
        /// Kite exception class, e.g. `InputException`.
        error_type: String,
        /// Error message from the API.
        message: String,
    },

    /// Access token or API key rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error (retryable).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Instruments CSV parsing error.
    #[error("CSV parsing error: {0}")]
    CsvParse(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}

impl From<KiteError> for BrokerError {
    fn from(err: KiteError) -> Self {
        match err {
            KiteError::Http(msg) | KiteError::Network(msg) => Self::ConnectionError { message: msg },
            KiteError::MaxRetriesExceeded { attempts } => Self::ConnectionError {
                message: format!("Max retries exceeded after {attempts} attempts"),
            },
            KiteError::AuthenticationFailed(msg) => Self::AuthenticationError { message: msg },
            KiteError::RateLimited { .. } => Self::RateLimited,
            KiteError::JsonParse(msg) | KiteError::CsvParse(msg) => {
                Self::InvalidResponse { message: msg }
            }
            KiteError::Api {
                error_type,
                message,
            } => Self::Unknown {
                message: format!("{error_type}: {message}"),
            },
        }
    }
}

impl From<KiteError> for InstrumentReferenceError {
    fn from(err: KiteError) -> Self {
        match err {
            KiteError::Http(msg) | KiteError::Network(msg) => Self::ConnectionError { message: msg },
            KiteError::MaxRetriesExceeded { attempts } => Self::ConnectionError {
                message: format!("Max retries exceeded after {attempts} attempts"),
            },
            KiteError::JsonParse(msg) | KiteError::CsvParse(msg) => Self::ParseError { message: msg },
            other => Self::Unknown {
                message: other.to_string(),
            },
        }
    }
}
