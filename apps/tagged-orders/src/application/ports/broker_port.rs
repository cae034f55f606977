//! Broker Port (Driven Port)
//!
//! Read access to the live brokerage order book.

use async_trait::async_trait;

use crate::domain::orders::RawOrder;

/// Broker port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    /// Connection error.
    #[error("Broker connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Credentials rejected.
    #[error("Broker authentication failed: {message}")]
    AuthenticationError {
        /// Error details.
        message: String,
    },

    /// Rate limited.
    #[error("Rate limited by broker")]
    RateLimited,

    /// Response could not be decoded.
    #[error("Invalid broker response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },

    /// Unknown error.
    #[error("Broker error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Port for broker interactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerPort: Send + Sync {
    /// Fetch every order of the trading day for the account, undecoded.
    async fn fetch_orders(&self) -> Result<Vec<RawOrder>, BrokerError>;
}
