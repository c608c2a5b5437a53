//! Quote and market mover models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time quote as returned by a provider.
///
/// Fields a provider does not supply are zero-filled rather than optional;
/// the original endpoints routinely omit change/volume and downstream code
/// treats missing as zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderQuote {
    /// Ticker symbol (e.g. "AAPL")
    pub symbol: String,
    /// Last traded price
    pub price: Decimal,
    /// Absolute change since previous close
    pub change: Decimal,
    /// Percent change since previous close (e.g. 1.25 for +1.25%)
    pub percent_change: Decimal,
    /// Day high
    pub day_high: Decimal,
    /// Day low
    pub day_low: Decimal,
    /// Traded volume, zero when the endpoint does not report it
    pub volume: i64,
    /// When the provider reported this quote
    pub as_of: DateTime<Utc>,
}

/// Pre-partitioned market movers from a provider that has a dedicated
/// top-movers endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopMovers {
    pub gainers: Vec<ProviderQuote>,
    pub losers: Vec<ProviderQuote>,
    pub most_active: Vec<ProviderQuote>,
}
