//! Market data provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, HistoryPoint, ProviderQuote, SearchHit, TopMovers};

/// Trait for market data providers.
///
/// Core services program against this trait; concrete implementations wrap
/// a single external HTTP API. Operations a provider does not offer return
/// [`MarketDataError::NotSupported`] so callers can fall back (the snapshot
/// aggregation path relies on this for top movers).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "ALPHA_VANTAGE" or "FINNHUB", used in logging
    /// and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    async fn get_quote(&self, symbol: &str) -> Result<ProviderQuote, MarketDataError>;

    /// Fetch the daily close series for a symbol, ordered by timestamp
    /// ascending. Callers wanting bounded retry on rate limits wrap this in
    /// [`retry_with_backoff`](crate::retry_with_backoff).
    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<HistoryPoint>, MarketDataError>;

    /// Fetch an intraday (5-minute) series for a symbol, ordered by timestamp
    /// ascending. Used for the one-day chart range.
    async fn get_intraday_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<HistoryPoint>, MarketDataError>;

    /// Search for symbols matching the query.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError>;

    /// Fetch company profile information for a symbol.
    ///
    /// Default implementation returns `NotSupported`.
    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch the provider's pre-partitioned top gainers/losers/most active
    /// lists.
    ///
    /// Default implementation returns `NotSupported`; the market service then
    /// aggregates a snapshot from individual quotes instead.
    async fn get_top_movers(&self) -> Result<TopMovers, MarketDataError> {
        Err(MarketDataError::NotSupported {
            operation: "top_movers".to_string(),
            provider: self.id().to_string(),
        })
    }
}
