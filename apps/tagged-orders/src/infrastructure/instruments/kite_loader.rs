//! Kite instruments dump loader implementing InstrumentReferencePort.

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, Utc};

use super::csv_parser::parse_instruments_csv;
use crate::application::ports::{InstrumentReferenceError, InstrumentReferencePort};
use crate::domain::instruments::InstrumentReferenceDataset;
use crate::infrastructure::broker::kite::{KiteConfig, KiteError, KiteHttpClient};

/// Index underlyings loaded when none are configured.
pub const DEFAULT_INDEX_UNDERLYINGS: [&str; 4] = ["NIFTY", "BANKNIFTY", "FINNIFTY", "MIDCPNIFTY"];

/// Default derivatives segment.
const DEFAULT_SEGMENT: &str = "NFO";

/// IST offset, used to date the dataset by the exchange calendar.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Loads index derivatives from `GET /instruments/{segment}`.
#[derive(Debug, Clone)]
pub struct KiteInstrumentLoader {
    client: KiteHttpClient,
    segment: String,
    underlyings: Vec<String>,
    as_of: Option<NaiveDate>,
}

impl KiteInstrumentLoader {
    /// Create a loader for the NFO segment and the default index underlyings.
    pub fn new(config: &KiteConfig) -> Result<Self, KiteError> {
        Ok(Self::with_client(KiteHttpClient::new(config)?))
    }

    /// Create a loader sharing an existing client.
    #[must_use]
    pub fn with_client(client: KiteHttpClient) -> Self {
        Self {
            client,
            segment: DEFAULT_SEGMENT.to_string(),
            underlyings: DEFAULT_INDEX_UNDERLYINGS.iter().map(|s| (*s).to_string()).collect(),
            as_of: None,
        }
    }

    /// Set the exchange segment.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = segment.into();
        self
    }

    /// Restrict to these underlyings; empty keeps all.
    #[must_use]
    pub fn with_underlyings(mut self, underlyings: Vec<String>) -> Self {
        self.underlyings = underlyings;
        self
    }

    /// Pin the dataset date instead of using today's IST date.
    #[must_use]
    pub const fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    fn today_ist() -> NaiveDate {
        FixedOffset::east_opt(IST_OFFSET_SECS).map_or_else(
            || Utc::now().date_naive(),
            |ist| Utc::now().with_timezone(&ist).date_naive(),
        )
    }
}

#[async_trait]
impl InstrumentReferencePort for KiteInstrumentLoader {
    async fn load_reference(&self) -> Result<InstrumentReferenceDataset, InstrumentReferenceError> {
        let path = format!("/instruments/{}", self.segment);
        tracing::debug!(segment = %self.segment, "Fetching instruments dump");

        let body = self.client.get_text(&path).await?;
        let entries = parse_instruments_csv(&body, &self.underlyings)?;
        let as_of = self.as_of.unwrap_or_else(Self::today_ist);

        tracing::debug!(
            segment = %self.segment,
            entries = entries.len(),
            %as_of,
            "Instrument reference loaded"
        );

        Ok(InstrumentReferenceDataset::new(entries, as_of))
    }
}
