//! Instrument domain services.

pub mod humanizer;
pub mod resolver;

pub use humanizer::{format_expiry, format_strike, humanize, instrument_type, ordinal_suffix};
#[cfg(test)]
pub use resolver::MockSymbolResolver;
pub use resolver::{ReferenceSymbolResolver, ResolvedSymbol, SymbolResolver};
