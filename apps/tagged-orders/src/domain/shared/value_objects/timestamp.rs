//! Order timestamp value object.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Offset of exchange-local time (IST, UTC+05:30) in seconds.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Naive layouts Kite and the order log use for exchange-local timestamps.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Error parsing an order timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order timestamp: {0:?}")]
pub struct TimestampParseError(pub String);

/// The point in time an order was placed.
///
/// Keeps the source text so the response echoes the order unchanged, while
/// equality and ordering use only the parsed instant.
#[derive(Debug, Clone)]
pub struct OrderTimestamp {
    instant: DateTime<Utc>,
    raw: String,
}

impl OrderTimestamp {
    /// Parse a timestamp.
    ///
    /// Accepts RFC 3339 (`2024-09-20T03:45:00Z`, `2024-09-20T09:15:00+05:30`)
    /// and exchange-local `2024-09-20 09:15:00`, which is read as IST.
    pub fn parse(s: &str) -> Result<Self, TimestampParseError> {
        let trimmed = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self {
                instant: dt.with_timezone(&Utc),
                raw: s.to_string(),
            });
        }

        let ist = FixedOffset::east_opt(IST_OFFSET_SECS)
            .ok_or_else(|| TimestampParseError(s.to_string()))?;

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .and_then(|naive| ist.from_local_datetime(&naive).single())
            .map(|dt| Self {
                instant: dt.with_timezone(&Utc),
                raw: s.to_string(),
            })
            .ok_or_else(|| TimestampParseError(s.to_string()))
    }

    /// Get the instant in UTC.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Get the text this timestamp was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for OrderTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            instant: dt,
            raw: dt.to_rfc3339(),
        }
    }
}

impl PartialEq for OrderTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for OrderTimestamp {}

impl PartialOrd for OrderTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for OrderTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for OrderTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for OrderTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
