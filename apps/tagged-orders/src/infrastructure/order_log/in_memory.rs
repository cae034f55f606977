//! In-memory order log.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{OrderLogError, OrderLogPort};
use crate::domain::orders::{Order, RawOrder};
use crate::domain::shared::OrderTag;

/// In-memory implementation of `OrderLogPort`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderLog {
    orders: RwLock<HashMap<String, Vec<RawOrder>>>,
}

impl InMemoryOrderLog {
    /// Create a new empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order under `tag` (for test setup).
    pub fn record(&self, tag: &str, order: Order) {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(tag.to_string())
            .or_default()
            .push(order.into_raw());
    }

    /// Number of tags with recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderLogPort for InMemoryOrderLog {
    async fn fetch_persisted_orders(
        &self,
        tag: &OrderTag,
    ) -> Result<Vec<RawOrder>, OrderLogError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.get(tag.as_str()).cloned().unwrap_or_default())
    }
}
