//! Order with its display label.

use serde::Serialize;

use super::Order;

/// An order enriched with a human-readable instrument label.
///
/// Serializes as the order's own fields plus `humanTradingSymbol`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanizedOrder {
    /// The order, unchanged.
    #[serde(flatten)]
    pub order: Order,
    /// Display label, e.g. `NIFTY 25th SEP 24000 CE`.
    #[serde(rename = "humanTradingSymbol")]
    pub human_trading_symbol: String,
}

impl HumanizedOrder {
    /// Pair an order with its label.
    #[must_use]
    pub const fn new(order: Order, human_trading_symbol: String) -> Self {
        Self {
            order,
            human_trading_symbol,
        }
    }
}
