//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the order log, the broker and the instrument reference
//! - **Use Cases**: The tagged-orders pipeline
//! - **Errors**: The request-level error taxonomy

pub mod errors;
pub mod ports;
pub mod use_cases;

pub use errors::{OrdersError, Upstream};
pub use ports::*;
pub use use_cases::*;
