//! Finnhub market data provider implementation.
//!
//! Endpoints used:
//! - /quote for latest quotes
//! - /search for symbol lookup
//! - /stock/candle for daily and intraday history
//! - /stock/profile2 for company profiles
//!
//! Finnhub has no top-movers endpoint, so [`MarketDataProvider::get_top_movers`]
//! keeps its `NotSupported` default and the market service aggregates a
//! snapshot from individual quotes. Free tier: 60 API calls per minute.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, HistoryPoint, ProviderQuote, SearchHit};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// How far back the daily candle request reaches (roughly matches the
/// "compact" window of other providers).
const DAILY_LOOKBACK_DAYS: i64 = 180;

// ============================================================================
// API response structures
// ============================================================================

/// Response from /quote
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change since previous close
    d: Option<f64>,
    /// Percent change since previous close
    dp: Option<f64>,
    /// Day high
    h: Option<f64>,
    /// Day low
    l: Option<f64>,
    /// Quote timestamp (Unix seconds)
    t: Option<i64>,
}

/// Response from /stock/candle
#[derive(Debug, Deserialize)]
struct CandleResponse {
    /// Status: "ok" or "no_data"
    s: String,
    /// Close prices
    #[serde(default)]
    c: Vec<f64>,
    /// Volumes
    #[serde(default)]
    v: Vec<f64>,
    /// Timestamps (Unix seconds)
    #[serde(default)]
    t: Vec<i64>,
}

/// Response from /search
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    description: String,
    symbol: String,
    #[serde(rename = "type")]
    security_type: String,
}

/// Response from /stock/profile2
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    name: Option<String>,
    ticker: Option<String>,
    finnhub_industry: Option<String>,
    country: Option<String>,
    weburl: Option<String>,
    logo: Option<String>,
    market_capitalization: Option<f64>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub market data provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("token", &self.api_key));

        let url =
            reqwest::Url::parse_with_params(&format!("{}/{}", BASE_URL, path), &all_params)
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to build URL: {}", e),
                })?;

        debug!(
            "Finnhub request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
    }

    fn decimal(v: Option<f64>) -> Decimal {
        v.and_then(Decimal::from_f64_retain).unwrap_or(Decimal::ZERO)
    }

    fn candles_to_points(candles: CandleResponse) -> Result<Vec<HistoryPoint>, MarketDataError> {
        if candles.s == "no_data" {
            return Err(MarketDataError::NoDataForRange);
        }

        let mut points: Vec<HistoryPoint> = candles
            .t
            .iter()
            .zip(candles.c.iter())
            .enumerate()
            .filter_map(|(i, (&ts, &close))| {
                let timestamp = Utc.timestamp_opt(ts, 0).single()?;
                Some(HistoryPoint {
                    timestamp,
                    price: Decimal::from_f64_retain(close)?,
                    volume: candles.v.get(i).map(|v| *v as i64).unwrap_or(0),
                })
            })
            .collect();

        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(points)
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        resolution: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let from_s = from.to_string();
        let to_s = to.to_string();
        let params = [
            ("symbol", symbol),
            ("resolution", resolution),
            ("from", from_s.as_str()),
            ("to", to_s.as_str()),
        ];
        let candles: CandleResponse = self.fetch("stock/candle", &params).await?;
        Self::candles_to_points(candles)
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<ProviderQuote, MarketDataError> {
        let quote: QuoteResponse = self.fetch("quote", &[("symbol", symbol)]).await?;

        // Finnhub answers unknown symbols with an all-zero body
        let price = quote.c.unwrap_or(0.0);
        if price <= 0.0 {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let as_of = quote
            .t
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(ProviderQuote {
            symbol: symbol.to_string(),
            price: Self::decimal(quote.c),
            change: Self::decimal(quote.d),
            percent_change: Self::decimal(quote.dp),
            day_high: Self::decimal(quote.h),
            day_low: Self::decimal(quote.l),
            volume: 0, // /quote does not report volume
            as_of,
        })
    }

    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let to = Utc::now().timestamp();
        let from = to - DAILY_LOOKBACK_DAYS * 86_400;
        self.fetch_candles(symbol, "D", from, to).await
    }

    async fn get_intraday_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let to = Utc::now().timestamp();
        let from = to - 86_400;
        self.fetch_candles(symbol, "5", from, to).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
        let response: SearchResponse = self.fetch("search", &[("q", query)]).await?;

        Ok(response
            .result
            .into_iter()
            .map(|item| SearchHit::new(item.symbol, item.description, item.security_type))
            .collect())
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let profile: ProfileResponse =
            self.fetch("stock/profile2", &[("symbol", symbol)]).await?;

        // An empty object means the symbol is unknown
        if profile.name.is_none() && profile.ticker.is_none() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        Ok(CompanyProfile {
            symbol: profile.ticker.unwrap_or_else(|| symbol.to_string()),
            name: profile.name.unwrap_or_default(),
            industry: profile.finnhub_industry,
            country: profile.country,
            website: profile.weburl,
            logo_url: profile.logo,
            market_cap: profile.market_capitalization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn candle_no_data_maps_to_error() {
        let candles = CandleResponse {
            s: "no_data".to_string(),
            c: vec![],
            v: vec![],
            t: vec![],
        };
        assert!(matches!(
            FinnhubProvider::candles_to_points(candles),
            Err(MarketDataError::NoDataForRange)
        ));
    }

    #[test]
    fn candles_zip_and_sort() {
        let candles = CandleResponse {
            s: "ok".to_string(),
            c: vec![102.0, 101.0],
            v: vec![200.0, 100.0],
            t: vec![1_700_086_400, 1_700_000_000],
        };
        let points = FinnhubProvider::candles_to_points(candles).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].timestamp < points[1].timestamp);
        assert_eq!(points[0].price, dec!(101.0));
        assert_eq!(points[0].volume, 100);
    }

    #[test]
    fn quote_with_nulls_zero_fills() {
        let body = r#"{"c": 12.5, "d": null, "dp": null, "h": 13.0, "l": 12.0, "o": 12.2, "pc": 12.4, "t": 1700000000}"#;
        let quote: QuoteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(FinnhubProvider::decimal(quote.d), Decimal::ZERO);
        assert_eq!(FinnhubProvider::decimal(quote.c), dec!(12.5));
    }
}
