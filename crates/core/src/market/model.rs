//! Market data domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockpulse_market_data::{ProviderQuote, SearchHit};

/// A stock quote as the application presents it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    /// Display name; falls back to the symbol when no profile is available
    pub company_name: String,
    pub current_price: Decimal,
    pub price_change: Decimal,
    pub percent_change: Decimal,
    pub volume: i64,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl Stock {
    /// Build a domain stock from a provider quote. The company name starts
    /// out as the symbol and is enriched separately where a profile exists.
    pub fn from_quote(quote: ProviderQuote) -> Self {
        Self {
            company_name: quote.symbol.clone(),
            symbol: quote.symbol,
            current_price: quote.price,
            price_change: quote.change,
            percent_change: quote.percent_change,
            volume: quote.volume,
            day_high: quote.day_high,
            day_low: quote.day_low,
            last_updated: quote.as_of,
        }
    }

    pub fn is_gaining(&self) -> bool {
        self.price_change >= Decimal::ZERO
    }
}

/// Top movers for the market overview screen. Held in process memory only
/// and rebuilt after its TTL lapses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub gainers: Vec<Stock>,
    pub losers: Vec<Stock>,
    pub most_active: Vec<Stock>,
    pub fetched_at: DateTime<Utc>,
}

/// Chart time ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    Day1,
    Week1,
    Month1,
    Month6,
    All,
}

impl TimeRange {
    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day1 => "1D",
            TimeRange::Week1 => "1W",
            TimeRange::Month1 => "1M",
            TimeRange::Month6 => "6M",
            TimeRange::All => "All",
        }
    }

    /// Number of days covered; `None` for the unbounded range.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Day1 => Some(1),
            TimeRange::Week1 => Some(7),
            TimeRange::Month1 => Some(30),
            TimeRange::Month6 => Some(180),
            TimeRange::All => None,
        }
    }

    /// Stable identifier used in cache keys.
    pub fn cache_key(&self) -> &'static str {
        match self {
            TimeRange::Day1 => "1d",
            TimeRange::Week1 => "1w",
            TimeRange::Month1 => "1m",
            TimeRange::Month6 => "6m",
            TimeRange::All => "all",
        }
    }
}

/// One point of a price chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub volume: i64,
}

/// A price series for one symbol and range, points ascending by timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub symbol: String,
    pub range: TimeRange,
    pub points: Vec<PricePoint>,
}

/// A symbol search result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub region: String,
    pub match_score: f64,
}

impl From<SearchHit> for SymbolMatch {
    fn from(hit: SearchHit) -> Self {
        Self {
            symbol: hit.symbol,
            name: hit.name,
            asset_type: hit.asset_type,
            region: hit.region,
            match_score: hit.score.unwrap_or(0.0),
        }
    }
}
