//! Application Use Cases

mod get_tagged_orders;

pub use get_tagged_orders::{GetTaggedOrdersUseCase, OrderSource};
