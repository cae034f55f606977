//! Instruments Bounded Context
//!
//! Reference data for index derivatives and the humanizer that turns an
//! exchange trading symbol into a display label.
//!
//! # Key Concepts
//!
//! - **InstrumentReferenceDataset**: Reference rows fetched once per request
//! - **TickerParts**: Name, encoded expiry, strike and type decoded from a ticker
//! - **SymbolResolver**: Maps a ticker to its expiry, name and strike
//! - **Humanizer**: `NIFTY24SEP24000CE` → `NIFTY 26th SEP 24000 CE`

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::SymbolResolutionError;
#[cfg(test)]
pub use services::MockSymbolResolver;
pub use services::{ReferenceSymbolResolver, ResolvedSymbol, SymbolResolver, humanize};
pub use value_objects::{
    EncodedExpiry, InstrumentReferenceDataset, InstrumentReferenceEntry, TickerParts,
};
