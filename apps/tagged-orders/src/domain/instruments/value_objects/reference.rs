//! Instrument reference dataset.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the instrument reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentReferenceEntry {
    /// Exchange trading symbol.
    pub tradingsymbol: String,
    /// Underlying name, e.g. `NIFTY`.
    pub name: String,
    /// Contract expiry date.
    pub expiry: NaiveDate,
    /// Strike price (zero for futures).
    pub strike: Decimal,
    /// `CE`, `PE` or `FUT`.
    pub instrument_type: String,
    /// Exchange segment, e.g. `NFO-OPT`.
    #[serde(default)]
    pub segment: Option<String>,
    /// Exchange, e.g. `NFO`.
    #[serde(default)]
    pub exchange: Option<String>,
}

/// Reference entries fetched for one request, indexed for lookup.
#[derive(Debug, Clone, Default)]
pub struct InstrumentReferenceDataset {
    entries: Vec<InstrumentReferenceEntry>,
    as_of: NaiveDate,
    by_symbol: HashMap<String, Vec<usize>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl InstrumentReferenceDataset {
    /// Build a dataset from its entries and the day it was fetched.
    #[must_use]
    pub fn new(entries: Vec<InstrumentReferenceEntry>, as_of: NaiveDate) -> Self {
        let mut by_symbol: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            by_symbol
                .entry(entry.tradingsymbol.clone())
                .or_default()
                .push(idx);
            by_name.entry(entry.name.clone()).or_default().push(idx);
        }

        Self {
            entries,
            as_of,
            by_symbol,
            by_name,
        }
    }

    /// Entries whose trading symbol equals `tradingsymbol`.
    pub fn by_tradingsymbol<'a>(
        &'a self,
        tradingsymbol: &str,
    ) -> impl Iterator<Item = &'a InstrumentReferenceEntry> + 'a {
        self.lookup(&self.by_symbol, tradingsymbol)
    }

    /// Entries for the underlying `name`.
    pub fn by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a InstrumentReferenceEntry> + 'a {
        self.lookup(&self.by_name, name)
    }

    fn lookup<'a>(
        &'a self,
        index: &'a HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = &'a InstrumentReferenceEntry> + 'a {
        index
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&idx| self.entries.get(idx))
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[InstrumentReferenceEntry] {
        &self.entries
    }

    /// Day the dataset was fetched.
    #[must_use]
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(symbol: &str, name: &str, expiry: NaiveDate) -> InstrumentReferenceEntry {
        InstrumentReferenceEntry {
            tradingsymbol: symbol.to_string(),
            name: name.to_string(),
            expiry,
            strike: dec!(24000),
            instrument_type: "CE".to_string(),
            segment: Some("NFO-OPT".to_string()),
            exchange: Some("NFO".to_string()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lookup_by_symbol_and_name() {
        let dataset = InstrumentReferenceDataset::new(
            vec![
                entry("NIFTY24SEP24000CE", "NIFTY", date(2024, 9, 26)),
                entry("NIFTY2491924000CE", "NIFTY", date(2024, 9, 19)),
                entry("BANKNIFTY24SEP51000CE", "BANKNIFTY", date(2024, 9, 25)),
            ],
            date(2024, 9, 16),
        );

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.by_tradingsymbol("NIFTY24SEP24000CE").count(), 1);
        assert_eq!(dataset.by_name("NIFTY").count(), 2);
        assert_eq!(dataset.by_name("FINNIFTY").count(), 0);
        assert_eq!(dataset.as_of(), date(2024, 9, 16));
    }

    #[test]
    fn empty_dataset() {
        let dataset = InstrumentReferenceDataset::new(Vec::new(), date(2024, 9, 16));
        assert!(dataset.is_empty());
        assert_eq!(dataset.by_tradingsymbol("NIFTY24SEP24000CE").count(), 0);
    }
}
