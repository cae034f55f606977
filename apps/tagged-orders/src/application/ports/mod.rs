//! Application Ports (Driven)
//!
//! Outbound interfaces the use case depends on. Adapters live in
//! `infrastructure`.

mod broker_port;
mod instrument_reference_port;
mod order_log_port;

pub use broker_port::{BrokerError, BrokerPort};
#[cfg(test)]
pub use broker_port::MockBrokerPort;
pub use instrument_reference_port::{InstrumentReferenceError, InstrumentReferencePort};
#[cfg(test)]
pub use instrument_reference_port::MockInstrumentReferencePort;
pub use order_log_port::{OrderLogError, OrderLogPort};
#[cfg(test)]
pub use order_log_port::MockOrderLogPort;
