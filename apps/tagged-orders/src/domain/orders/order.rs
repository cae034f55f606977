//! Order model.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{RawOrder, TransactionType};
use crate::domain::shared::{OrderId, OrderTimestamp};

/// An order that failed to decode after surviving dedup and tag filtering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order {order_id} is malformed: {message}")]
pub struct OrderDecodeError {
    /// The order's id, or `<missing>`.
    pub order_id: String,
    /// Decoder message.
    pub message: String,
}

/// Fields the pipeline reads.
#[derive(Deserialize)]
struct TypedFields {
    order_id: OrderId,
    order_timestamp: OrderTimestamp,
    transaction_type: TransactionType,
    #[serde(default)]
    tag: Option<String>,
    tradingsymbol: String,
}

/// An order as reported by the order log or the broker.
///
/// Only the fields the pipeline reads are typed. The source object is kept
/// alongside and is what gets serialized, so every field (including a
/// numeric `order_id`) is echoed exactly as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    /// Unique order identifier (dedup key).
    pub order_id: OrderId,
    /// When the order was placed.
    pub order_timestamp: OrderTimestamp,
    /// BUY or SELL.
    pub transaction_type: TransactionType,
    /// Strategy/basket tag. Kite reports `null` for untagged orders.
    pub tag: Option<String>,
    /// Exchange trading symbol, e.g. `NIFTY24SEP24000CE`.
    pub tradingsymbol: String,
    source: RawOrder,
}

impl Order {
    /// Create an order with no other source fields.
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        order_timestamp: OrderTimestamp,
        transaction_type: TransactionType,
        tag: Option<&str>,
        tradingsymbol: impl Into<String>,
    ) -> Self {
        let order_id = OrderId::new(order_id);
        let tradingsymbol = tradingsymbol.into();

        let mut fields = Map::new();
        fields.insert("order_id".to_string(), Value::from(order_id.as_str()));
        fields.insert(
            "order_timestamp".to_string(),
            Value::from(order_timestamp.as_str()),
        );
        fields.insert(
            "transaction_type".to_string(),
            Value::from(transaction_type.to_string()),
        );
        fields.insert("tag".to_string(), tag.map_or(Value::Null, Value::from));
        fields.insert("tradingsymbol".to_string(), Value::from(tradingsymbol.as_str()));

        Self {
            order_id,
            order_timestamp,
            transaction_type,
            tag: tag.map(str::to_string),
            tradingsymbol,
            source: RawOrder::from_map(fields),
        }
    }

    /// Attach a source field that the pipeline does not read.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.source.insert(key, value);
        self
    }

    /// A source field, typed or not.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.source.get(key)
    }

    /// The source object.
    #[must_use]
    pub const fn as_raw(&self) -> &RawOrder {
        &self.source
    }

    /// Give back the source object.
    #[must_use]
    pub fn into_raw(self) -> RawOrder {
        self.source
    }
}

impl TryFrom<RawOrder> for Order {
    type Error = OrderDecodeError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        let typed = TypedFields::deserialize(&Value::Object(raw.as_map().clone())).map_err(|e| {
            OrderDecodeError {
                order_id: raw.order_key().unwrap_or_else(|| "<missing>".to_string()),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            order_id: typed.order_id,
            order_timestamp: typed.order_timestamp,
            transaction_type: typed.transaction_type,
            tag: typed.tag,
            tradingsymbol: typed.tradingsymbol,
            source: raw,
        })
    }
}

impl Serialize for Order {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.source.serialize(serializer)
    }
}
