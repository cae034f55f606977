//! Instrument Reference Port (Driven Port)

use async_trait::async_trait;

use crate::domain::instruments::InstrumentReferenceDataset;

/// Instrument reference port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InstrumentReferenceError {
    /// Connection error.
    #[error("Instrument reference connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Dump could not be parsed.
    #[error("Instrument reference parse error: {message}")]
    ParseError {
        /// Error details.
        message: String,
    },

    /// Unknown error.
    #[error("Instrument reference error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Port supplying the instrument reference dataset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstrumentReferencePort: Send + Sync {
    /// Load the dataset for the current trading day.
    async fn load_reference(&self) -> Result<InstrumentReferenceDataset, InstrumentReferenceError>;
}
