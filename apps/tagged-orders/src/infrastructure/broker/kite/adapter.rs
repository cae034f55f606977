//! Kite broker adapter implementing BrokerPort.

use async_trait::async_trait;

use crate::application::ports::{BrokerError, BrokerPort};
use crate::domain::orders::RawOrder;

use super::config::KiteConfig;
use super::error::KiteError;
use super::http_client::KiteHttpClient;

/// Zerodha Kite Connect broker adapter.
///
/// Implements `BrokerPort` over `GET /orders`.
#[derive(Debug, Clone)]
pub struct KiteBrokerAdapter {
    client: KiteHttpClient,
}

impl KiteBrokerAdapter {
    /// Create a new Kite broker adapter.
    pub fn new(config: &KiteConfig) -> Result<Self, KiteError> {
        Ok(Self {
            client: KiteHttpClient::new(config)?,
        })
    }

    /// Create an adapter sharing an existing client.
    #[must_use]
    pub const fn with_client(client: KiteHttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BrokerPort for KiteBrokerAdapter {
    async fn fetch_orders(&self) -> Result<Vec<RawOrder>, BrokerError> {
        tracing::debug!("Fetching orders from Kite");

        let orders: Vec<RawOrder> = self
            .client
            .get_data("/orders")
            .await
            .map_err(BrokerError::from)?;

        tracing::debug!(count = orders.len(), "Kite orders fetched");
        Ok(orders)
    }
}
