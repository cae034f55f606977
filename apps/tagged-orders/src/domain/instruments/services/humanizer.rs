//! Trading symbol humanizer.
//!
//! Builds display labels of the form `<name> <Do MMM> <strike> <type>`,
//! e.g. `NIFTY 25th SEP 24000 CE`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::resolver::SymbolResolver;
use crate::domain::instruments::errors::SymbolResolutionError;
use crate::domain::instruments::value_objects::InstrumentReferenceDataset;

/// The literal last two characters of a symbol (`CE`, `PE`, `UT` for futures).
#[must_use]
pub fn instrument_type(tradingsymbol: &str) -> Option<&str> {
    let (idx, _) = tradingsymbol.char_indices().rev().nth(1)?;
    tradingsymbol.get(idx..)
}

/// English ordinal suffix for a day of month.
#[must_use]
pub const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Format an expiry as `Do MMM` with the month upper-cased: `25th SEP`.
#[must_use]
pub fn format_expiry(expiry: NaiveDate) -> String {
    let day = expiry.day();
    format!(
        "{}{} {}",
        day,
        ordinal_suffix(day),
        expiry.format("%b").to_string().to_uppercase()
    )
}

/// Strike in its natural numeric form: `24000`, `24050.5`.
#[must_use]
pub fn format_strike(strike: Decimal) -> String {
    strike.normalize().to_string()
}

/// Build the display label for `tradingsymbol`.
pub fn humanize<R>(
    resolver: &R,
    dataset: &InstrumentReferenceDataset,
    tradingsymbol: &str,
) -> Result<String, SymbolResolutionError>
where
    R: SymbolResolver + ?Sized,
{
    let kind = instrument_type(tradingsymbol).ok_or_else(|| {
        SymbolResolutionError::MalformedSymbol {
            tradingsymbol: tradingsymbol.to_string(),
        }
    })?;

    let resolved = resolver.resolve(dataset, tradingsymbol, kind)?;

    Ok(format!(
        "{} {} {} {}",
        resolved.name,
        format_expiry(resolved.expiry),
        format_strike(resolved.strike),
        kind
    ))
}
