//! Undecoded order objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order object exactly as the order log or the broker sent it.
///
/// Dedup and tag filtering run on this form, so orders that are dropped
/// never have to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawOrder(Map<String, Value>);

impl RawOrder {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Dedup key: the `order_id` as text.
    ///
    /// Strings are used verbatim and numbers in their JSON form, so `1` and
    /// `"1"` collide. `None` when the field is absent, `null` or not a scalar.
    #[must_use]
    pub fn order_key(&self) -> Option<String> {
        match self.0.get("order_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The `tag` field when it is a string.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.0.get("tag").and_then(Value::as_str)
    }

    /// A source field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a source field.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// The underlying object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawOrder {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
