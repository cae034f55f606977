//! Order Log Adapters
//!
//! Implementations of `OrderLogPort`.

pub mod http;
pub mod in_memory;

pub use http::{HttpOrderLogAdapter, OrderLogConfig};
pub use in_memory::InMemoryOrderLog;
