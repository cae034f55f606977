//! Trading symbol resolution.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::instruments::errors::SymbolResolutionError;
use crate::domain::instruments::value_objects::{
    EncodedExpiry, InstrumentReferenceDataset, InstrumentReferenceEntry, TickerParts,
};

/// Decoded metadata of a trading symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// Contract expiry date.
    pub expiry: NaiveDate,
    /// Underlying name.
    pub name: String,
    /// Strike price (zero for futures).
    pub strike: Decimal,
}

impl From<&InstrumentReferenceEntry> for ResolvedSymbol {
    fn from(entry: &InstrumentReferenceEntry) -> Self {
        Self {
            expiry: entry.expiry,
            name: entry.name.clone(),
            strike: entry.strike,
        }
    }
}

/// Resolves a trading symbol to its expiry, name and strike.
#[cfg_attr(test, mockall::automock)]
pub trait SymbolResolver: Send + Sync {
    /// Resolve `tradingsymbol`, whose last two characters are `instrument_type`.
    fn resolve(
        &self,
        dataset: &InstrumentReferenceDataset,
        tradingsymbol: &str,
        instrument_type: &str,
    ) -> Result<ResolvedSymbol, SymbolResolutionError>;
}

/// Resolver backed by the instrument reference dataset.
///
/// 1. Entries with the same trading symbol win outright.
/// 2. Otherwise the ticker is decomposed and matched on name, strike,
///    instrument type and encoded expiry. A monthly code selects the last
///    expiry of its month.
///
/// Remaining ties go to the nearest expiry on or after the dataset's
/// `as_of` date, falling back to the latest expiry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSymbolResolver;

impl ReferenceSymbolResolver {
    /// Create a new resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn resolve_decomposed<'a>(
        dataset: &'a InstrumentReferenceDataset,
        parts: &TickerParts,
        instrument_type: &str,
    ) -> Option<&'a InstrumentReferenceEntry> {
        let candidates: Vec<_> = dataset
            .by_name(&parts.name)
            .filter(|entry| entry.instrument_type.ends_with(instrument_type))
            .filter(|entry| parts.strike.is_none_or(|strike| entry.strike == strike))
            .filter(|entry| parts.expiry.covers(entry.expiry))
            .collect();

        match parts.expiry {
            EncodedExpiry::Monthly { .. } => {
                let last = candidates.iter().map(|entry| entry.expiry).max()?;
                let monthly = candidates.into_iter().filter(|entry| entry.expiry == last);
                nearest_expiry(monthly, dataset.as_of())
            }
            EncodedExpiry::Weekly(_) => nearest_expiry(candidates.into_iter(), dataset.as_of()),
        }
    }
}

impl SymbolResolver for ReferenceSymbolResolver {
    fn resolve(
        &self,
        dataset: &InstrumentReferenceDataset,
        tradingsymbol: &str,
        instrument_type: &str,
    ) -> Result<ResolvedSymbol, SymbolResolutionError> {
        if let Some(entry) = nearest_expiry(dataset.by_tradingsymbol(tradingsymbol), dataset.as_of())
        {
            return Ok(entry.into());
        }

        let parts = TickerParts::parse(tradingsymbol).ok_or_else(|| {
            SymbolResolutionError::MalformedSymbol {
                tradingsymbol: tradingsymbol.to_string(),
            }
        })?;

        Self::resolve_decomposed(dataset, &parts, instrument_type)
            .map(ResolvedSymbol::from)
            .ok_or_else(|| SymbolResolutionError::UnknownInstrument {
                tradingsymbol: tradingsymbol.to_string(),
            })
    }
}

/// Nearest expiry on or after `as_of`, else the latest one.
fn nearest_expiry<'a>(
    entries: impl Iterator<Item = &'a InstrumentReferenceEntry>,
    as_of: NaiveDate,
) -> Option<&'a InstrumentReferenceEntry> {
    let (upcoming, expired): (Vec<_>, Vec<_>) = entries.partition(|entry| entry.expiry >= as_of);
    upcoming
        .into_iter()
        .min_by_key(|entry| entry.expiry)
        .or_else(|| expired.into_iter().max_by_key(|entry| entry.expiry))
}
