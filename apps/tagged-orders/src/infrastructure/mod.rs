//! Infrastructure Layer
//!
//! Adapters (implementations) for the ports defined in the application layer.
//!
//! - **Driven Adapters (Outbound)**
//!   - `broker/`: Kite Connect order book
//!   - `order_log/`: Persisted order log (HTTP key-value store, in-memory)
//!   - `instruments/`: Kite instruments dump loader
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controller
//!
//! - **Wiring and resilience**
//!   - `config/`: Dependency injection container
//!   - `retry`: Exponential backoff for outbound HTTP

pub mod broker;
pub mod config;
pub mod http;
pub mod instruments;
pub mod order_log;
pub mod retry;
