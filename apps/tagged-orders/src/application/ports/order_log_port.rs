//! Order Log Port (Driven Port)
//!
//! Orders persisted at placement time, keyed by order tag.

use async_trait::async_trait;

use crate::domain::orders::RawOrder;
use crate::domain::shared::OrderTag;

/// Order log port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderLogError {
    /// Connection error.
    #[error("Order log connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("Order log returned HTTP {status}: {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Error details.
        message: String,
    },

    /// Response could not be decoded.
    #[error("Invalid order log response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for the persisted order log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLogPort: Send + Sync {
    /// Orders recorded under `tag`, undecoded. A tag with no record yields
    /// an empty list.
    async fn fetch_persisted_orders(
        &self,
        tag: &OrderTag,
    ) -> Result<Vec<RawOrder>, OrderLogError>;
}
