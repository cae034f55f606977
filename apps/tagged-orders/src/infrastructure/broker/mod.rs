//! Broker adapters.

pub mod kite;
