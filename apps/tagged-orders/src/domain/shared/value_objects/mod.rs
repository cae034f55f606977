//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod timestamp;

pub use identifiers::{OrderId, OrderTag};
pub use timestamp::{OrderTimestamp, TimestampParseError};
