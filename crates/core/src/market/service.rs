//! Market service: cached quotes, snapshots, history and symbol search.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use futures::future::join_all;
use log::debug;

use stockpulse_market_data::{
    retry_with_backoff, HistoryPoint, MarketDataError, MarketDataProvider, TopMovers,
};

use super::model::{MarketSnapshot, PriceHistory, PricePoint, Stock, SymbolMatch, TimeRange};
use super::snapshot::partition_snapshot;
use super::traits::SearchHistoryRepositoryTrait;
use crate::cache::{fetch_or_stale, Clock, KeyValueCache};
use crate::constants::{
    self, HISTORY_RETRY_ATTEMPTS, HISTORY_RETRY_BASE_DELAY, SNAPSHOT_CANDIDATES,
};
use crate::diagnostics::ErrorLogServiceTrait;
use crate::errors::{Error, Result};
use crate::settings::SettingsServiceTrait;

const SNAPSHOT_CACHE_KEY: &str = "snapshot";

/// Service trait for market data operations.
#[async_trait]
pub trait MarketServiceTrait: Send + Sync {
    /// Top gainers, losers and most active stocks.
    async fn get_market_snapshot(&self, force_refresh: bool) -> Result<MarketSnapshot>;

    /// Latest quote for one symbol, with the company name resolved where the
    /// provider has a profile for it.
    async fn get_quote(&self, symbol: &str, force_refresh: bool) -> Result<Stock>;

    /// Price series for a symbol over a chart range.
    async fn get_price_history(
        &self,
        symbol: &str,
        range: TimeRange,
        force_refresh: bool,
    ) -> Result<PriceHistory>;

    /// Search for symbols and record the query in the search history.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>>;

    fn recent_searches(&self, limit: i64) -> Result<Vec<String>>;

    async fn clear_search_history(&self) -> Result<()>;
}

pub struct MarketService {
    provider: Arc<dyn MarketDataProvider>,
    /// Sqlite-backed, survives restarts. Quotes and history.
    quote_cache: Arc<dyn KeyValueCache>,
    /// Process-local. The snapshot is cheap to rebuild and has no value
    /// across restarts.
    snapshot_cache: Arc<dyn KeyValueCache>,
    settings: Arc<dyn SettingsServiceTrait>,
    search_history: Arc<dyn SearchHistoryRepositoryTrait>,
    error_log: Arc<dyn ErrorLogServiceTrait>,
    clock: Arc<dyn Clock>,
}

impl MarketService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        quote_cache: Arc<dyn KeyValueCache>,
        snapshot_cache: Arc<dyn KeyValueCache>,
        settings: Arc<dyn SettingsServiceTrait>,
        search_history: Arc<dyn SearchHistoryRepositoryTrait>,
        error_log: Arc<dyn ErrorLogServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            quote_cache,
            snapshot_cache,
            settings,
            search_history,
            error_log,
            clock,
        }
    }

    /// Fail before any network or cache work when no market data key is
    /// configured.
    fn ensure_api_key(&self) -> Result<()> {
        if self.settings.market_data_api_key()?.trim().is_empty() {
            return Err(Error::MissingApiKey("market data".to_string()));
        }
        Ok(())
    }

    fn movers_to_snapshot(&self, movers: TopMovers) -> MarketSnapshot {
        MarketSnapshot {
            gainers: movers.gainers.into_iter().map(Stock::from_quote).collect(),
            losers: movers.losers.into_iter().map(Stock::from_quote).collect(),
            most_active: movers
                .most_active
                .into_iter()
                .map(Stock::from_quote)
                .collect(),
            fetched_at: self.clock.now(),
        }
    }

    /// Build a snapshot from per-symbol quotes over the candidate list.
    /// Symbols that fail are recorded in the error log and skipped; only
    /// when every candidate fails does the whole snapshot fail.
    async fn aggregate_snapshot(&self) -> Result<MarketSnapshot> {
        let quotes = join_all(
            SNAPSHOT_CANDIDATES
                .iter()
                .map(|symbol| async move { (*symbol, self.provider.get_quote(symbol).await) }),
        )
        .await;

        let mut stocks = Vec::with_capacity(quotes.len());
        let mut last_error = None;
        for (symbol, result) in quotes {
            match result {
                Ok(quote) => stocks.push(Stock::from_quote(quote)),
                Err(err) => {
                    self.error_log
                        .log(
                            "MarketService",
                            &format!("Snapshot quote for {} failed", symbol),
                            Some(err.to_string()),
                        )
                        .await;
                    last_error = Some(err);
                }
            }
        }

        if stocks.is_empty() {
            return match last_error {
                Some(err) => Err(err.into()),
                None => Err(Error::Unexpected(
                    "no snapshot candidates configured".to_string(),
                )),
            };
        }

        Ok(partition_snapshot(stocks, self.clock.now()))
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        match self.provider.get_top_movers().await {
            Ok(movers) => Ok(self.movers_to_snapshot(movers)),
            Err(MarketDataError::NotSupported { .. }) => self.aggregate_snapshot().await,
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Stock> {
        let quote = self.provider.get_quote(symbol).await?;
        let mut stock = Stock::from_quote(quote);
        // Best effort: a quote without a display name is still a quote.
        match self.provider.get_profile(symbol).await {
            Ok(profile) if !profile.name.trim().is_empty() => {
                stock.company_name = profile.name;
            }
            Ok(_) | Err(MarketDataError::NotSupported { .. }) => {}
            Err(err) => debug!("profile lookup for {} failed: {}", symbol, err),
        }
        Ok(stock)
    }

    async fn fetch_history(&self, symbol: &str, range: TimeRange) -> Result<PriceHistory> {
        let points = match range {
            TimeRange::Day1 => self.provider.get_intraday_history(symbol).await?,
            _ => {
                retry_with_backoff(HISTORY_RETRY_ATTEMPTS, HISTORY_RETRY_BASE_DELAY, || {
                    self.provider.get_daily_history(symbol)
                })
                .await?
            }
        };

        let points = self.clip_to_range(points, range);
        if points.is_empty() {
            return Err(MarketDataError::NoDataForRange.into());
        }

        Ok(PriceHistory {
            symbol: symbol.to_string(),
            range,
            points,
        })
    }

    /// Drop points older than the range window. The daily endpoint returns
    /// a fixed lookback regardless of the requested range.
    fn clip_to_range(&self, points: Vec<HistoryPoint>, range: TimeRange) -> Vec<PricePoint> {
        let cutoff = range.days().map(|days| self.clock.now() - Duration::days(days));
        points
            .into_iter()
            .filter(|p| cutoff.map_or(true, |cutoff| p.timestamp >= cutoff))
            .map(|p| PricePoint {
                timestamp: p.timestamp,
                price: p.price,
                volume: p.volume,
            })
            .collect()
    }
}

#[async_trait]
impl MarketServiceTrait for MarketService {
    async fn get_market_snapshot(&self, force_refresh: bool) -> Result<MarketSnapshot> {
        self.ensure_api_key()?;
        fetch_or_stale(
            self.snapshot_cache.as_ref(),
            self.clock.as_ref(),
            SNAPSHOT_CACHE_KEY,
            constants::snapshot_ttl(),
            force_refresh,
            || self.fetch_snapshot(),
        )
        .await
    }

    async fn get_quote(&self, symbol: &str, force_refresh: bool) -> Result<Stock> {
        self.ensure_api_key()?;
        let key = format!("quote:{}", symbol);
        fetch_or_stale(
            self.quote_cache.as_ref(),
            self.clock.as_ref(),
            &key,
            constants::quote_ttl(),
            force_refresh,
            || self.fetch_quote(symbol),
        )
        .await
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        range: TimeRange,
        force_refresh: bool,
    ) -> Result<PriceHistory> {
        self.ensure_api_key()?;
        let key = format!("history:{}:{}", symbol, range.cache_key());
        fetch_or_stale(
            self.quote_cache.as_ref(),
            self.clock.as_ref(),
            &key,
            constants::history_ttl(),
            force_refresh,
            || self.fetch_history(symbol, range),
        )
        .await
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        self.ensure_api_key()?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.provider.search(query).await.map_err(Error::from)?;

        if let Err(err) = self.search_history.save_search(query).await {
            self.error_log
                .log(
                    "MarketService",
                    "Failed to record search query",
                    Some(err.to_string()),
                )
                .await;
        }

        Ok(hits.into_iter().map(SymbolMatch::from).collect())
    }

    fn recent_searches(&self, limit: i64) -> Result<Vec<String>> {
        self.search_history.recent_searches(limit)
    }

    async fn clear_search_history(&self) -> Result<()> {
        self.search_history.clear().await
    }
}
