//! Order list normalization.
//!
//! Applied in this order: dedup by `order_id`, keep only the requested tag,
//! decode, sort newest first. Dedup and filtering read the raw objects, so
//! a malformed order that is dropped never fails the request.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{Order, OrderDecodeError, RawOrder};
use crate::domain::shared::OrderTag;

/// Drop later orders whose `order_id` was already seen. Stable.
///
/// Orders without a usable `order_id` share one key, so only the first of
/// them is kept.
#[must_use]
pub fn dedup_by_order_id(orders: Vec<RawOrder>) -> Vec<RawOrder> {
    let mut seen = HashSet::with_capacity(orders.len());
    orders
        .into_iter()
        .filter(|order| seen.insert(order.order_key()))
        .collect()
}

/// Keep orders whose tag equals `tag` exactly.
#[must_use]
pub fn filter_by_tag(orders: Vec<RawOrder>, tag: &OrderTag) -> Vec<RawOrder> {
    orders
        .into_iter()
        .filter(|order| tag.matches(order.tag()))
        .collect()
}

/// Decode every order.
///
/// # Errors
///
/// The first malformed order fails the batch.
pub fn decode_orders(orders: Vec<RawOrder>) -> Result<Vec<Order>, OrderDecodeError> {
    orders.into_iter().map(Order::try_from).collect()
}

/// Newest first; at the same instant SELL precedes BUY.
#[must_use]
pub fn compare_newest_first(a: &Order, b: &Order) -> Ordering {
    b.order_timestamp.cmp(&a.order_timestamp).then_with(|| {
        a.transaction_type
            .same_instant_rank()
            .cmp(&b.transaction_type.same_instant_rank())
    })
}

/// Sort in place with [`compare_newest_first`]. Ties keep input order.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(compare_newest_first);
}

/// Dedup, filter, decode and sort.
///
/// # Errors
///
/// Returns an error when an order that survives the filter is malformed.
pub fn normalize(
    orders: Vec<RawOrder>,
    tag: &OrderTag,
) -> Result<Vec<Order>, OrderDecodeError> {
    let mut orders = decode_orders(filter_by_tag(dedup_by_order_id(orders), tag))?;
    sort_newest_first(&mut orders);
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::TransactionType;
    use crate::domain::shared::OrderTimestamp;
    use serde_json::json;

    fn order(id: &str, ts: &str, side: TransactionType, tag: Option<&str>) -> Order {
        Order::new(
            id,
            OrderTimestamp::parse(ts).unwrap(),
            side,
            tag,
            "NIFTY24SEP24000CE",
        )
    }

    fn raw(order: Order) -> RawOrder {
        order.into_raw()
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.order_id.as_str()).collect()
    }

    fn raw_ids(orders: &[RawOrder]) -> Vec<String> {
        orders.iter().filter_map(RawOrder::order_key).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let first = order("1", "2024-09-20 09:15:00", TransactionType::Buy, Some("t"))
            .with_field("status", json!("OPEN"));
        let dup = order("1", "2024-09-20 09:16:00", TransactionType::Buy, Some("t"))
            .with_field("status", json!("COMPLETE"));
        let other = order("2", "2024-09-20 09:17:00", TransactionType::Sell, Some("t"));

        let out = dedup_by_order_id(vec![raw(first), raw(dup), raw(other)]);

        assert_eq!(raw_ids(&out), vec!["1", "2"]);
        assert_eq!(out[0].get("status"), Some(&json!("OPEN")));
    }

    #[test]
    fn filter_is_exact_match() {
        let tag = OrderTag::parse("straddle1").unwrap();
        let orders = vec![
            raw(order("1", "2024-09-20 09:15:00", TransactionType::Buy, Some("straddle1"))),
            raw(order("2", "2024-09-20 09:15:00", TransactionType::Buy, Some("straddle10"))),
            raw(order("3", "2024-09-20 09:15:00", TransactionType::Buy, Some("STRADDLE1"))),
            raw(order("4", "2024-09-20 09:15:00", TransactionType::Buy, None)),
        ];

        let out = filter_by_tag(orders, &tag);
        assert_eq!(raw_ids(&out), vec!["1"]);
    }

    #[test]
    fn sorts_newest_first() {
        let mut orders = vec![
            order("a", "2024-09-20 09:15:00", TransactionType::Buy, Some("t")),
            order("c", "2024-09-20 11:00:00", TransactionType::Buy, Some("t")),
            order("b", "2024-09-20 10:00:00", TransactionType::Sell, Some("t")),
        ];

        sort_newest_first(&mut orders);
        assert_eq!(ids(&orders), vec!["c", "b", "a"]);
    }

    #[test]
    fn sell_before_buy_at_same_instant() {
        let mut orders = vec![
            order("buy", "2024-09-20 09:15:00", TransactionType::Buy, Some("t")),
            order("sell", "2024-09-20 09:15:00", TransactionType::Sell, Some("t")),
        ];

        sort_newest_first(&mut orders);
        assert_eq!(ids(&orders), vec!["sell", "buy"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut orders = vec![
            order("x", "2024-09-20 09:15:00", TransactionType::Buy, Some("t")),
            order("y", "2024-09-20 09:15:00", TransactionType::Buy, Some("t")),
        ];

        sort_newest_first(&mut orders);
        assert_eq!(ids(&orders), vec!["x", "y"]);
    }

    #[test]
    fn mixed_timestamp_formats_sort_by_instant() {
        let mut orders = vec![
            order("utc", "2024-09-20T04:00:00Z", TransactionType::Buy, Some("t")),
            order("ist", "2024-09-20 10:00:00", TransactionType::Buy, Some("t")),
        ];

        sort_newest_first(&mut orders);
        assert_eq!(ids(&orders), vec!["ist", "utc"]);
    }

    #[test]
    fn normalize_dedups_before_filtering() {
        // The first copy of "1" carries another tag, so the tagged copy is dropped too.
        let tag = OrderTag::parse("t").unwrap();
        let orders = vec![
            raw(order("1", "2024-09-20 09:15:00", TransactionType::Buy, Some("other"))),
            raw(order("1", "2024-09-20 09:15:00", TransactionType::Buy, Some("t"))),
            raw(order("2", "2024-09-20 09:20:00", TransactionType::Sell, Some("t"))),
        ];

        let out = normalize(orders, &tag).unwrap();
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn normalize_empty() {
        let tag = OrderTag::parse("t").unwrap();
        assert!(normalize(Vec::new(), &tag).unwrap().is_empty());
    }

    #[test]
    fn malformed_orders_of_other_tags_are_dropped_before_decoding() {
        let tag = OrderTag::parse("t").unwrap();
        let orders: Vec<RawOrder> = serde_json::from_value(json!([
            {"order_id": "x1", "order_timestamp": null, "transaction_type": "BUY", "tag": "other", "tradingsymbol": "NIFTY24SEP24000CE"},
            {"order_id": "x2", "transaction_type": "HOLD", "tag": "other"},
            {"tag": null},
            {"order_id": "1", "order_timestamp": "2024-09-20 09:15:00", "transaction_type": "BUY", "tag": "t", "tradingsymbol": "NIFTY24SEP24000CE"}
        ]))
        .unwrap();

        let out = normalize(orders, &tag).unwrap();
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn malformed_tagged_order_fails() {
        let tag = OrderTag::parse("t").unwrap();
        let orders: Vec<RawOrder> = serde_json::from_value(json!([
            {"order_id": "1", "order_timestamp": "not a time", "transaction_type": "BUY", "tag": "t", "tradingsymbol": "NIFTY24SEP24000CE"}
        ]))
        .unwrap();

        let err = normalize(orders, &tag).unwrap_err();
        assert_eq!(err.order_id, "1");
    }

    #[test]
    fn numeric_and_string_ids_dedup_together() {
        let orders: Vec<RawOrder> = serde_json::from_value(json!([
            {"order_id": 5, "tag": "first"},
            {"order_id": "5", "tag": "second"},
            {"tag": "no-id-a"},
            {"order_id": null, "tag": "no-id-b"}
        ]))
        .unwrap();

        let out = dedup_by_order_id(orders);
        let tags: Vec<_> = out.iter().filter_map(RawOrder::tag).collect();
        assert_eq!(tags, vec!["first", "no-id-a"]);
    }
}
