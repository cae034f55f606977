//! Zerodha Kite Connect Adapter
//!
//! Read-only Kite Connect v3 integration:
//! - `GET /orders` behind `BrokerPort`
//! - Raw access to the instruments dump for the reference loader
//! - Retry logic with exponential backoff

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::KiteBrokerAdapter;
pub use api_types::KiteEnvelope;
pub use config::{DEFAULT_KITE_BASE_URL, KiteConfig};
pub use error::KiteError;
pub use http_client::KiteHttpClient;
