//! Kite instruments CSV parser.
//!
//! Header: `instrument_token,exchange_token,tradingsymbol,name,last_price,
//! expiry,strike,tick_size,lot_size,instrument_type,segment,exchange`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::instruments::InstrumentReferenceEntry;
use crate::infrastructure::broker::kite::KiteError;

/// One CSV row; columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct InstrumentRow {
    tradingsymbol: String,
    name: String,
    expiry: String,
    strike: String,
    instrument_type: String,
    #[serde(default)]
    segment: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
}

impl InstrumentRow {
    /// Convert to an entry. Rows without an expiry (cash instruments) yield `None`.
    fn into_entry(self, line: usize) -> Result<Option<InstrumentReferenceEntry>, KiteError> {
        let expiry = self.expiry.trim();
        if expiry.is_empty() {
            return Ok(None);
        }

        let expiry = NaiveDate::parse_from_str(expiry, "%Y-%m-%d").map_err(|e| {
            KiteError::CsvParse(format!("line {line}: invalid expiry {expiry:?}: {e}"))
        })?;

        let strike = match self.strike.trim() {
            "" => Decimal::ZERO,
            raw => Decimal::from_str(raw).map_err(|e| {
                KiteError::CsvParse(format!("line {line}: invalid strike {raw:?}: {e}"))
            })?,
        };

        Ok(Some(InstrumentReferenceEntry {
            tradingsymbol: self.tradingsymbol,
            name: self.name,
            expiry,
            strike,
            instrument_type: self.instrument_type,
            segment: self.segment.filter(|s| !s.is_empty()),
            exchange: self.exchange.filter(|s| !s.is_empty()),
        }))
    }
}

/// Parse the instruments dump, keeping rows whose `name` is in `underlyings`.
///
/// An empty `underlyings` keeps every dated row.
pub fn parse_instruments_csv(
    body: &str,
    underlyings: &[String],
) -> Result<Vec<InstrumentReferenceEntry>, KiteError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut entries = Vec::new();

    // Line 1 is the header.
    for (idx, result) in reader.deserialize::<InstrumentRow>().enumerate() {
        let row = result.map_err(|e| KiteError::CsvParse(e.to_string()))?;

        if !underlyings.is_empty() && !underlyings.iter().any(|u| *u == row.name) {
            continue;
        }

        if let Some(entry) = row.into_entry(idx + 2)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange";

    fn dump(rows: &[&str]) -> String {
        let mut body = HEADER.to_string();
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body
    }

    #[test]
    fn parses_option_and_future_rows() {
        let body = dump(&[
            "12345678,48225,NIFTY24SEP24000CE,\"NIFTY\",0,2024-09-26,24000.0,0.05,25,CE,NFO-OPT,NFO",
            "12345679,48226,NIFTY24SEPFUT,\"NIFTY\",0,2024-09-26,0,0.05,25,FUT,NFO-FUT,NFO",
        ]);

        let entries = parse_instruments_csv(&body, &[]).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tradingsymbol, "NIFTY24SEP24000CE");
        assert_eq!(entries[0].name, "NIFTY");
        assert_eq!(entries[0].strike, dec!(24000));
        assert_eq!(entries[0].expiry, NaiveDate::from_ymd_opt(2024, 9, 26).unwrap());
        assert_eq!(entries[0].segment.as_deref(), Some("NFO-OPT"));
        assert_eq!(entries[1].instrument_type, "FUT");
        assert_eq!(entries[1].strike, Decimal::ZERO);
    }

    #[test]
    fn skips_rows_without_expiry() {
        let body = dump(&[
            "738561,2885,RELIANCE,\"RELIANCE INDUSTRIES\",0,,0,0.05,1,EQ,NSE,NSE",
            "12345678,48225,NIFTY24SEP24000CE,\"NIFTY\",0,2024-09-26,24000,0.05,25,CE,NFO-OPT,NFO",
        ]);

        let entries = parse_instruments_csv(&body, &[]).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn filters_underlyings() {
        let body = dump(&[
            "1,1,NIFTY24SEP24000CE,\"NIFTY\",0,2024-09-26,24000,0.05,25,CE,NFO-OPT,NFO",
            "2,2,RELIANCE24SEP3000CE,\"RELIANCE\",0,2024-09-26,3000,0.05,250,CE,NFO-OPT,NFO",
            "3,3,BANKNIFTY24SEP51000PE,\"BANKNIFTY\",0,2024-09-25,51000,0.05,15,PE,NFO-OPT,NFO",
        ]);

        let underlyings = vec!["NIFTY".to_string(), "BANKNIFTY".to_string()];
        let entries = parse_instruments_csv(&body, &underlyings).unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["NIFTY", "BANKNIFTY"]);
    }

    #[test]
    fn fractional_strike() {
        let body = dump(&[
            "1,1,FINNIFTY24SEP23250.5PE,\"FINNIFTY\",0,2024-09-24,23250.5,0.05,25,PE,NFO-OPT,NFO",
        ]);
        let entries = parse_instruments_csv(&body, &[]).unwrap();
        assert_eq!(entries[0].strike, dec!(23250.5));
    }

    #[test]
    fn invalid_expiry_is_error() {
        let body = dump(&["1,1,NIFTY24SEP24000CE,\"NIFTY\",0,26-09-2024,24000,0.05,25,CE,NFO-OPT,NFO"]);
        assert!(matches!(
            parse_instruments_csv(&body, &[]),
            Err(KiteError::CsvParse(_))
        ));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(parse_instruments_csv(HEADER, &[]).unwrap().is_empty());
    }
}
