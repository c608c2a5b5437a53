//! Alpha Vantage market data provider implementation.
//!
//! Endpoints used:
//! - GLOBAL_QUOTE for latest quotes
//! - SYMBOL_SEARCH for symbol lookup
//! - TOP_GAINERS_LOSERS for pre-partitioned market movers
//! - TIME_SERIES_DAILY / TIME_SERIES_INTRADAY for price history
//!
//! Note: Alpha Vantage free tier is heavily rate limited; throttling shows up
//! both as HTTP 429 and as a "Note"/"Information" field on a 200 response.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{HistoryPoint, ProviderQuote, SearchHit, TopMovers};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage market data provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

// ============================================================================
// Response structures for the Alpha Vantage API
// ============================================================================

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

#[derive(Debug, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SearchMatch>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type")]
    asset_type: String,
    #[serde(rename = "4. region")]
    region: String,
    #[serde(rename = "9. matchScore")]
    match_score: String,
}

#[derive(Debug, Deserialize)]
struct TopMoversResponse {
    #[serde(rename = "top_gainers", default)]
    top_gainers: Vec<MarketMover>,
    #[serde(rename = "top_losers", default)]
    top_losers: Vec<MarketMover>,
    #[serde(rename = "most_actively_traded", default)]
    most_actively_traded: Vec<MarketMover>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarketMover {
    ticker: String,
    price: String,
    change_amount: String,
    change_percentage: String,
    volume: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesDailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesIntradayResponse {
    #[serde(rename = "Time Series (5min)")]
    time_series: Option<HashMap<String, DailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request to the Alpha Vantage API and return the raw body.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(BASE_URL, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
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
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Check for API-level errors carried in the body of a 200 response.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(msg) = error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" usually indicates rate limiting
        if let Some(msg) = note {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        if let Some(msg) = information {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    fn parse_body<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Parse a decimal string, treating garbage as zero (the API pads missing
    /// values with "-" or "None").
    fn decimal_or_zero(s: &str) -> Decimal {
        Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO)
    }

    /// Parse a "1.2345%" style percentage string.
    fn percent_or_zero(s: &str) -> Decimal {
        Decimal::from_str(s.trim().trim_end_matches('%')).unwrap_or(Decimal::ZERO)
    }

    fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|dt| Utc.from_local_datetime(&dt).single())
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .and_then(|dt| Utc.from_local_datetime(&dt).single())
    }

    fn mover_to_quote(mover: &MarketMover) -> ProviderQuote {
        ProviderQuote {
            symbol: mover.ticker.clone(),
            price: Self::decimal_or_zero(&mover.price),
            change: Self::decimal_or_zero(&mover.change_amount),
            percent_change: Self::percent_or_zero(&mover.change_percentage),
            day_high: Decimal::ZERO,
            day_low: Decimal::ZERO,
            volume: mover.volume.trim().parse().unwrap_or(0),
            as_of: Utc::now(),
        }
    }

    fn bars_to_points(
        bars: HashMap<String, DailyBar>,
        parse_ts: fn(&str) -> Option<DateTime<Utc>>,
    ) -> Vec<HistoryPoint> {
        let mut points: Vec<HistoryPoint> = bars
            .into_iter()
            .filter_map(|(ts, bar)| {
                let timestamp = parse_ts(&ts)?;
                let price = Decimal::from_str(bar.close.trim()).ok()?;
                Some(HistoryPoint {
                    timestamp,
                    price,
                    volume: bar.volume.trim().parse().unwrap_or(0),
                })
            })
            .collect();

        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        points
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<ProviderQuote, MarketDataError> {
        let params = [("function", "GLOBAL_QUOTE"), ("symbol", symbol)];
        let text = self.fetch(&params).await?;
        let response: GlobalQuoteResponse = Self::parse_body(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        // An empty "Global Quote" object means the symbol is unknown
        let quote = response
            .global_quote
            .filter(|q| !q.symbol.is_empty())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(ProviderQuote {
            symbol: quote.symbol.clone(),
            price: Self::decimal_or_zero(&quote.price),
            change: Self::decimal_or_zero(&quote.change),
            percent_change: Self::percent_or_zero(&quote.change_percent),
            day_high: Self::decimal_or_zero(&quote.high),
            day_low: Self::decimal_or_zero(&quote.low),
            volume: quote.volume.trim().parse().unwrap_or(0),
            as_of: Utc::now(),
        })
    }

    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "compact"), // 'full' is premium-only
        ];
        let text = self.fetch(&params).await?;
        let response: TimeSeriesDailyResponse = Self::parse_body(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let series = response
            .time_series
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let points = Self::bars_to_points(series, Self::parse_date);
        debug!(
            "Alpha Vantage: fetched {} daily points for {}",
            points.len(),
            symbol
        );
        Ok(points)
    }

    async fn get_intraday_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", symbol),
            ("interval", "5min"),
        ];
        let text = self.fetch(&params).await?;
        let response: TimeSeriesIntradayResponse = Self::parse_body(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let series = response
            .time_series
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(Self::bars_to_points(series, Self::parse_datetime))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
        let params = [("function", "SYMBOL_SEARCH"), ("keywords", query)];
        let text = self.fetch(&params).await?;
        let response: SymbolSearchResponse = Self::parse_body(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        Ok(response
            .best_matches
            .into_iter()
            .map(|m| {
                let score = m.match_score.trim().parse::<f64>().ok();
                let mut hit =
                    SearchHit::new(m.symbol, m.name, m.asset_type).with_region(m.region);
                if let Some(score) = score {
                    hit = hit.with_score(score);
                }
                hit
            })
            .collect())
    }

    async fn get_top_movers(&self) -> Result<TopMovers, MarketDataError> {
        let params = [("function", "TOP_GAINERS_LOSERS")];
        let text = self.fetch(&params).await?;
        let response: TopMoversResponse = Self::parse_body(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        Ok(TopMovers {
            gainers: response.top_gainers.iter().map(Self::mover_to_quote).collect(),
            losers: response.top_losers.iter().map(Self::mover_to_quote).collect(),
            most_active: response
                .most_actively_traded
                .iter()
                .map(Self::mover_to_quote)
                .collect(),
        })
    }
}
