//! Instrument Errors

use thiserror::Error;

/// Errors resolving a trading symbol against the reference dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolResolutionError {
    /// Symbol too short to carry an instrument type, or not a derivatives ticker.
    #[error("Malformed trading symbol: {tradingsymbol}")]
    MalformedSymbol { tradingsymbol: String },

    /// No reference entry matches the symbol.
    #[error("Unknown instrument: {tradingsymbol}")]
    UnknownInstrument { tradingsymbol: String },
}

impl SymbolResolutionError {
    /// The symbol that failed to resolve.
    #[must_use]
    pub fn tradingsymbol(&self) -> &str {
        match self {
            Self::MalformedSymbol { tradingsymbol } | Self::UnknownInstrument { tradingsymbol } => {
                tradingsymbol
            }
        }
    }
}
