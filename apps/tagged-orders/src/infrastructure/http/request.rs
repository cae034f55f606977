//! HTTP request DTOs.

use serde::Deserialize;

/// Query string of `GET /api/v1/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersQuery {
    /// Order tag to look up. Missing and blank are both rejected downstream.
    #[serde(default)]
    pub order_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_query() {
        let query: OrdersQuery = serde_json::from_str(r#"{"order_tag":"straddle1"}"#).unwrap();
        assert_eq!(query.order_tag.as_deref(), Some("straddle1"));

        let query: OrdersQuery = serde_json::from_str("{}").unwrap();
        assert!(query.order_tag.is_none());
    }
}
