//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up order IDs with tags or other strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    OrderId,
    "Broker-assigned order identifier. The deduplication key for orders."
);
define_id!(
    OrderTag,
    "Caller-assigned label grouping the orders of one basket execution."
);

impl OrderId {
    /// Create a new order identifier from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Order logs written by older tooling store `order_id` as a JSON number,
/// while Kite returns it as a string. Both collapse to the same identifier.
impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawOrderId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawOrderId::deserialize(deserializer)? {
            RawOrderId::Text(s) => Self(s),
            RawOrderId::Unsigned(n) => Self(n.to_string()),
            RawOrderId::Signed(n) => Self(n.to_string()),
        })
    }
}

impl OrderTag {
    /// Parse a tag from a request value.
    ///
    /// Returns `None` for empty or whitespace-only input. The tag is kept
    /// verbatim otherwise, since matching against orders is exact.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// Whether an order's tag equals this tag exactly.
    #[must_use]
    pub fn matches(&self, tag: Option<&str>) -> bool {
        tag == Some(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("240920000123456");
        assert_eq!(id.as_str(), "240920000123456");
        assert_eq!(format!("{id}"), "240920000123456");
    }

    #[test]
    fn order_id_from_json_string() {
        let id: OrderId = serde_json::from_str("\"240920000123456\"").unwrap();
        assert_eq!(id.as_str(), "240920000123456");
    }

    #[test]
    fn order_id_from_json_number_matches_string_form() {
        let numeric: OrderId = serde_json::from_str("240920000123456").unwrap();
        let text: OrderId = serde_json::from_str("\"240920000123456\"").unwrap();
        assert_eq!(numeric, text);
    }

    #[test]
    fn order_id_serializes_as_string() {
        let id = OrderId::new("ord-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ord-1\"");
    }

    #[test]
    fn order_id_rejects_non_scalar() {
        assert!(serde_json::from_str::<OrderId>("{\"id\":1}").is_err());
    }

    #[test]
    fn order_tag_parse_rejects_blank() {
        assert!(OrderTag::parse("").is_none());
        assert!(OrderTag::parse("   ").is_none());
    }

    #[test]
    fn order_tag_matches_exactly() {
        let tag = OrderTag::parse("straddle1").unwrap();
        assert!(tag.matches(Some("straddle1")));
        assert!(!tag.matches(Some("Straddle1")));
        assert!(!tag.matches(Some("straddle10")));
        assert!(!tag.matches(None));
    }

    #[test]
    fn hash_works_for_collections() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(OrderId::new("ord-1"));
        set.insert(OrderId::new("ord-2"));
        set.insert(OrderId::new("ord-1"));

        assert_eq!(set.len(), 2);
    }
}
