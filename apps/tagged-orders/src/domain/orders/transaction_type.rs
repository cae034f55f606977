//! Transaction type (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction type of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl TransactionType {
    /// Secondary sort key for orders sharing a timestamp.
    ///
    /// Lower ranks come first: the SELL leg is listed before the BUY leg.
    #[must_use]
    pub const fn same_instant_rank(&self) -> u8 {
        match self {
            Self::Sell => 0,
            Self::Buy => 1,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
