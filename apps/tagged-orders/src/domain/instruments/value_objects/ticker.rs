//! Derivatives ticker decomposition.
//!
//! Exchange symbols for index derivatives follow three layouts:
//!
//! | Kind           | Layout                        | Example                  |
//! |----------------|-------------------------------|--------------------------|
//! | Monthly option | `NAME YY MMM STRIKE TYPE`     | `NIFTY24SEP24000CE`      |
//! | Weekly option  | `NAME YY M DD STRIKE TYPE`    | `BANKNIFTY24O0951000PE`  |
//! | Future         | `NAME YY MMM FUT`             | `NIFTY24SEPFUT`          |
//!
//! The weekly month code is `1`-`9` for January to September and `O`, `N`,
//! `D` for October to December.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

const OPTION_REGEX: &str = r"^(?P<name>[A-Z][A-Z0-9&-]*?)(?P<yy>\d{2})(?P<code>[A-Z]{3}|[1-9OND]\d{2})(?P<strike>\d+(?:\.\d+)?)(?P<kind>CE|PE)$";
const FUTURE_REGEX: &str = r"^(?P<name>[A-Z][A-Z0-9&-]*?)(?P<yy>\d{2})(?P<mon>[A-Z]{3})FUT$";

#[allow(clippy::expect_used)] // Pattern is a compile-time constant covered by tests
static OPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OPTION_REGEX).expect("option ticker regex is valid"));

#[allow(clippy::expect_used)] // Pattern is a compile-time constant covered by tests
static FUTURE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FUTURE_REGEX).expect("future ticker regex is valid"));

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Expiry as encoded in the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedExpiry {
    /// Monthly contract: only year and month are encoded.
    Monthly {
        /// Four-digit year.
        year: i32,
        /// Month, 1-12.
        month: u32,
    },
    /// Weekly contract: the full date is encoded.
    Weekly(NaiveDate),
}

impl EncodedExpiry {
    /// Whether `date` falls on this encoded expiry.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        match *self {
            Self::Monthly { year, month } => date.year() == year && date.month() == month,
            Self::Weekly(expiry) => date == expiry,
        }
    }
}

/// Components decoded from a derivatives ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerParts {
    /// Underlying name.
    pub name: String,
    /// Encoded expiry.
    pub expiry: EncodedExpiry,
    /// Strike price; `None` for futures.
    pub strike: Option<Decimal>,
    /// `CE`, `PE` or `FUT`.
    pub instrument_type: String,
}

impl TickerParts {
    /// Decompose a ticker. Returns `None` when it matches no known layout.
    #[must_use]
    pub fn parse(tradingsymbol: &str) -> Option<Self> {
        Self::parse_option(tradingsymbol).or_else(|| Self::parse_future(tradingsymbol))
    }

    fn parse_option(tradingsymbol: &str) -> Option<Self> {
        let caps = OPTION_PATTERN.captures(tradingsymbol)?;
        let year = full_year(&caps["yy"])?;
        let code = &caps["code"];

        let expiry = match month_from_name(code) {
            Some(month) => EncodedExpiry::Monthly { year, month },
            None => {
                let month = weekly_month(code.chars().next()?)?;
                let day = code.get(1..)?.parse().ok()?;
                EncodedExpiry::Weekly(NaiveDate::from_ymd_opt(year, month, day)?)
            }
        };

        Some(Self {
            name: caps["name"].to_string(),
            expiry,
            strike: Some(Decimal::from_str(&caps["strike"]).ok()?),
            instrument_type: caps["kind"].to_string(),
        })
    }

    fn parse_future(tradingsymbol: &str) -> Option<Self> {
        let caps = FUTURE_PATTERN.captures(tradingsymbol)?;
        Some(Self {
            name: caps["name"].to_string(),
            expiry: EncodedExpiry::Monthly {
                year: full_year(&caps["yy"])?,
                month: month_from_name(&caps["mon"])?,
            },
            strike: None,
            instrument_type: "FUT".to_string(),
        })
    }
}

fn full_year(yy: &str) -> Option<i32> {
    yy.parse::<i32>().ok().map(|y| 2000 + y)
}

fn month_from_name(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

fn weekly_month(code: char) -> Option<u32> {
    match code {
        '1'..='9' => code.to_digit(10),
        'O' => Some(10),
        'N' => Some(11),
        'D' => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn patterns_compile() {
        assert!(Regex::new(OPTION_REGEX).is_ok());
        assert!(Regex::new(FUTURE_REGEX).is_ok());
        assert!(OPTION_PATTERN.is_match("NIFTY24SEP24000CE"));
        assert!(FUTURE_PATTERN.is_match("NIFTY24SEPFUT"));
    }

    #[test]
    fn monthly_option() {
        let parts = TickerParts::parse("NIFTY24SEP24000CE").unwrap();
        assert_eq!(parts.name, "NIFTY");
        assert_eq!(parts.expiry, EncodedExpiry::Monthly { year: 2024, month: 9 });
        assert_eq!(parts.strike, Some(dec!(24000)));
        assert_eq!(parts.instrument_type, "CE");
    }

    #[test]
    fn weekly_option_with_letter_month() {
        let parts = TickerParts::parse("BANKNIFTY24O0951000PE").unwrap();
        assert_eq!(parts.name, "BANKNIFTY");
        assert_eq!(parts.expiry, EncodedExpiry::Weekly(date(2024, 10, 9)));
        assert_eq!(parts.strike, Some(dec!(51000)));
        assert_eq!(parts.instrument_type, "PE");
    }

    #[test]
    fn weekly_option_with_digit_month() {
        let parts = TickerParts::parse("NIFTY2491924000CE").unwrap();
        assert_eq!(parts.expiry, EncodedExpiry::Weekly(date(2024, 9, 19)));
        assert_eq!(parts.strike, Some(dec!(24000)));
    }

    #[test]
    fn fractional_strike() {
        let parts = TickerParts::parse("FINNIFTY24SEP23250.5PE").unwrap();
        assert_eq!(parts.name, "FINNIFTY");
        assert_eq!(parts.strike, Some(dec!(23250.5)));
    }

    #[test]
    fn future() {
        let parts = TickerParts::parse("NIFTY24SEPFUT").unwrap();
        assert_eq!(parts.name, "NIFTY");
        assert_eq!(parts.expiry, EncodedExpiry::Monthly { year: 2024, month: 9 });
        assert_eq!(parts.strike, None);
        assert_eq!(parts.instrument_type, "FUT");
    }

    #[test_case("RELIANCE" ; "equity")]
    #[test_case("NIFTY24XYZ24000CE" ; "unknown month")]
    #[test_case("NIFTY24D3224000CE" ; "invalid weekly day")]
    #[test_case("nifty24sep24000ce" ; "lowercase")]
    #[test_case("" ; "empty")]
    fn rejects(symbol: &str) {
        assert!(TickerParts::parse(symbol).is_none());
    }

    #[test]
    fn covers_monthly_and_weekly() {
        let monthly = EncodedExpiry::Monthly { year: 2024, month: 9 };
        assert!(monthly.covers(date(2024, 9, 26)));
        assert!(!monthly.covers(date(2024, 10, 3)));

        let weekly = EncodedExpiry::Weekly(date(2024, 10, 9));
        assert!(weekly.covers(date(2024, 10, 9)));
        assert!(!weekly.covers(date(2024, 10, 10)));
    }
}
