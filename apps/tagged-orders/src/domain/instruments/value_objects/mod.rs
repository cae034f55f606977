//! Instrument value objects.

mod reference;
mod ticker;

pub use reference::{InstrumentReferenceDataset, InstrumentReferenceEntry};
pub use ticker::{EncodedExpiry, TickerParts};
