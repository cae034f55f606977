//! Orders Bounded Context
//!
//! Orders as reported by the order log or the broker, and the pipeline that
//! turns a raw list into the tagged, newest-first view.
//!
//! # Key Concepts
//!
//! - **RawOrder**: An order object as received, before decoding
//! - **Order**: One decoded broker order; the source object is kept verbatim
//! - **Normalizer**: `dedup_by_order_id` → `filter_by_tag` → `decode_orders` → `sort_newest_first`
//! - **HumanizedOrder**: An order plus its display label

mod humanized_order;
pub mod normalizer;
mod order;
mod raw_order;
mod transaction_type;

pub use humanized_order::HumanizedOrder;
pub use normalizer::{
    compare_newest_first, decode_orders, dedup_by_order_id, filter_by_tag, normalize,
    sort_newest_first,
};
pub use order::{Order, OrderDecodeError};
pub use raw_order::RawOrder;
pub use transaction_type::TransactionType;
