//! Instrument Reference Adapters
//!
//! Loads the Kite instruments dump into an `InstrumentReferenceDataset`.

mod csv_parser;
mod kite_loader;

pub use csv_parser::parse_instruments_csv;
pub use kite_loader::{DEFAULT_INDEX_UNDERLYINGS, KiteInstrumentLoader};
