//! Prediction service.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use stockpulse_market_data::{MarketDataError, MarketDataProvider};

use super::catalog::{self, AlgorithmEntry};
use super::model::{Algorithm, Prediction};
use crate::cache::{fetch_or_stale, Clock, KeyValueCache};
use crate::constants::predictions_ttl;
use crate::diagnostics::ErrorLogServiceTrait;
use crate::errors::{Error, Result};
use crate::market::Stock;
use crate::settings::SettingsServiceTrait;

/// Service trait for prediction algorithms.
#[async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    /// The static algorithm catalog.
    fn algorithms(&self) -> Vec<Algorithm>;

    /// Run one algorithm over its symbol pool. Results are cached per
    /// algorithm for a short window; failed symbols are logged and dropped.
    async fn get_predictions(
        &self,
        algorithm_id: &str,
        force_refresh: bool,
    ) -> Result<Vec<Prediction>>;
}

pub struct PredictionService {
    provider: Arc<dyn MarketDataProvider>,
    /// Process-local; predictions are synthetic and cheap to rebuild.
    cache: Arc<dyn KeyValueCache>,
    settings: Arc<dyn SettingsServiceTrait>,
    error_log: Arc<dyn ErrorLogServiceTrait>,
    clock: Arc<dyn Clock>,
}

impl PredictionService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        cache: Arc<dyn KeyValueCache>,
        settings: Arc<dyn SettingsServiceTrait>,
        error_log: Arc<dyn ErrorLogServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            cache,
            settings,
            error_log,
            clock,
        }
    }

    async fn fetch_stock(&self, symbol: &str) -> Result<Stock> {
        let quote = self.provider.get_quote(symbol).await?;
        let mut stock = Stock::from_quote(quote);
        match self.provider.get_profile(symbol).await {
            Ok(profile) if !profile.name.trim().is_empty() => {
                stock.company_name = profile.name;
            }
            Ok(_) | Err(MarketDataError::NotSupported { .. }) => {}
            Err(err) => debug!("profile lookup for {} failed: {}", symbol, err),
        }
        Ok(stock)
    }

    async fn run_algorithm(&self, entry: &AlgorithmEntry) -> Result<Vec<Prediction>> {
        let results = join_all(
            entry
                .symbols
                .iter()
                .map(|symbol| async move { (*symbol, self.fetch_stock(symbol).await) }),
        )
        .await;

        let mut stocks = Vec::with_capacity(results.len());
        for (symbol, result) in results {
            match result {
                Ok(stock) => stocks.push(stock),
                Err(err) => {
                    self.error_log
                        .log(
                            "PredictionService",
                            &format!("Failed to fetch {}", symbol),
                            Some(err.to_string()),
                        )
                        .await;
                }
            }
        }

        let algorithm = entry.to_algorithm();
        let predicted_at = self.clock.now();

        // thread_rng is not Send, so all awaits happen before this block
        let mut predictions: Vec<Prediction> = {
            let mut rng = rand::thread_rng();
            stocks
                .into_iter()
                .map(|stock| Prediction {
                    stock,
                    algorithm: algorithm.clone(),
                    confidence: rng.gen_range(0.6..0.95),
                    signal: pick_signal(&mut rng, entry.messages).to_string(),
                    predicted_at,
                })
                .collect()
        };

        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        Ok(predictions)
    }
}

/// Pick one signal message at random; an empty pool yields an empty signal
/// rather than panicking.
fn pick_signal<'a, R: Rng + ?Sized>(rng: &mut R, messages: &[&'a str]) -> &'a str {
    messages.choose(rng).copied().unwrap_or_default()
}

#[async_trait]
impl PredictionServiceTrait for PredictionService {
    fn algorithms(&self) -> Vec<Algorithm> {
        catalog::algorithms()
    }

    async fn get_predictions(
        &self,
        algorithm_id: &str,
        force_refresh: bool,
    ) -> Result<Vec<Prediction>> {
        let entry = catalog::find(algorithm_id)
            .ok_or_else(|| Error::NotFound(format!("Algorithm {} not found", algorithm_id)))?;

        if self.settings.market_data_api_key()?.trim().is_empty() {
            return Err(Error::MissingApiKey("market data".to_string()));
        }

        let key = format!("predictions:{}", entry.id);
        fetch_or_stale(
            self.cache.as_ref(),
            self.clock.as_ref(),
            &key,
            predictions_ttl(),
            force_refresh,
            || self.run_algorithm(entry),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, Utc};
    use rust_decimal_macros::dec;

    use stockpulse_market_data::{CompanyProfile, HistoryPoint, ProviderQuote, SearchHit};

    use super::*;
    use crate::cache::testing::ManualClock;
    use crate::cache::MemoryCache;
    use crate::diagnostics::testing::RecordingErrorLog;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn quote(symbol: &str) -> ProviderQuote {
        ProviderQuote {
            symbol: symbol.to_string(),
            price: dec!(100),
            change: dec!(1),
            percent_change: dec!(1),
            day_high: dec!(101),
            day_low: dec!(99),
            volume: 0,
            as_of: t0(),
        }
    }

    #[derive(Default)]
    struct MockProvider {
        quotes: Mutex<HashMap<String, ProviderQuote>>,
        quote_calls: AtomicU32,
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_quote(
            &self,
            symbol: &str,
        ) -> std::result::Result<ProviderQuote, MarketDataError> {
            self.quote_calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.quotes
                .lock()
                .unwrap()
                .get(symbol)
                .cloned()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_daily_history(
            &self,
            _symbol: &str,
        ) -> std::result::Result<Vec<HistoryPoint>, MarketDataError> {
            Err(MarketDataError::NoDataForRange)
        }

        async fn get_intraday_history(
            &self,
            _symbol: &str,
        ) -> std::result::Result<Vec<HistoryPoint>, MarketDataError> {
            Err(MarketDataError::NoDataForRange)
        }

        async fn search(
            &self,
            _query: &str,
        ) -> std::result::Result<Vec<SearchHit>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn get_profile(
            &self,
            symbol: &str,
        ) -> std::result::Result<CompanyProfile, MarketDataError> {
            Ok(CompanyProfile {
                symbol: symbol.to_string(),
                name: format!("{} Incorporated", symbol),
                ..Default::default()
            })
        }
    }

    struct MockSettings {
        market_key: String,
    }

    #[async_trait]
    impl SettingsServiceTrait for MockSettings {
        fn market_data_api_key(&self) -> Result<String> {
            Ok(self.market_key.clone())
        }

        fn ai_api_key(&self) -> Result<String> {
            Ok(String::new())
        }

        async fn set_market_data_api_key(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn set_ai_api_key(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        fn has_api_keys(&self) -> Result<bool> {
            Ok(false)
        }
    }

    struct Fixture {
        provider: Arc<MockProvider>,
        error_log: Arc<RecordingErrorLog>,
        clock: Arc<ManualClock>,
        service: PredictionService,
    }

    fn fixture_with_key(market_key: &str) -> Fixture {
        let provider = Arc::new(MockProvider::default());
        let error_log = Arc::new(RecordingErrorLog::default());
        let clock = Arc::new(ManualClock::new(t0()));
        let service = PredictionService::new(
            provider.clone(),
            Arc::new(MemoryCache::new()),
            Arc::new(MockSettings {
                market_key: market_key.to_string(),
            }),
            error_log.clone(),
            clock.clone(),
        );
        Fixture {
            provider,
            error_log,
            clock,
            service,
        }
    }

    fn fixture() -> Fixture {
        let f = fixture_with_key("test-key");
        let mut quotes = f.provider.quotes.lock().unwrap();
        quotes.insert("AAPL".to_string(), quote("AAPL"));
        quotes.insert("NVDA".to_string(), quote("NVDA"));
        drop(quotes);
        f
    }

    const POOL_SIZE: usize = 10;

    #[test]
    fn signal_pick_draws_from_the_pool() {
        let mut rng = rand::thread_rng();
        let pool = ["buy signal", "sell signal"];
        assert!(pool.contains(&pick_signal(&mut rng, &pool)));
    }

    #[test]
    fn signal_pick_tolerates_an_empty_pool() {
        let mut rng = rand::thread_rng();
        assert_eq!(pick_signal(&mut rng, &[]), "");
    }

    #[tokio::test]
    async fn unknown_algorithm_is_an_error() {
        let f = fixture();

        let result = f.service.get_predictions("nope", false).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(f.provider.quote_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_provider_calls() {
        let f = fixture_with_key("");

        let result = f.service.get_predictions("volume_surge", false).await;

        assert!(matches!(result, Err(Error::MissingApiKey(_))));
        assert_eq!(f.provider.quote_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn predictions_cover_reachable_symbols_sorted_by_confidence() {
        let f = fixture();

        let predictions = f.service.get_predictions("volume_surge", false).await.unwrap();

        // Only the two symbols with quotes survive
        assert_eq!(predictions.len(), 2);
        for p in &predictions {
            assert!(p.confidence >= 0.6 && p.confidence < 0.95);
            assert_eq!(p.algorithm.id, "volume_surge");
            assert!(p.stock.company_name.ends_with("Incorporated"));
            assert_eq!(p.predicted_at, t0());
        }
        for pair in predictions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }

        // The eight failed symbols were logged, not surfaced
        assert_eq!(f.error_log.entries.lock().unwrap().len(), POOL_SIZE - 2);
    }

    #[tokio::test]
    async fn predictions_are_cached_per_algorithm() {
        let f = fixture();

        let _ = f.service.get_predictions("volume_surge", false).await.unwrap();
        let calls_after_first = f.provider.quote_calls.load(AtomicOrdering::SeqCst);

        f.clock.advance(Duration::minutes(9));
        let _ = f.service.get_predictions("volume_surge", false).await.unwrap();

        assert_eq!(
            f.provider.quote_calls.load(AtomicOrdering::SeqCst),
            calls_after_first
        );
    }

    #[tokio::test]
    async fn force_refresh_reruns_the_algorithm() {
        let f = fixture();

        let _ = f.service.get_predictions("volume_surge", false).await.unwrap();
        let calls_after_first = f.provider.quote_calls.load(AtomicOrdering::SeqCst);

        let _ = f.service.get_predictions("volume_surge", true).await.unwrap();

        assert!(f.provider.quote_calls.load(AtomicOrdering::SeqCst) > calls_after_first);
    }

    #[tokio::test]
    async fn catalog_is_exposed_through_the_service() {
        let f = fixture();
        assert_eq!(f.service.algorithms().len(), 5);
    }
}
