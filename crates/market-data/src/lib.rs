//! Stockpulse market data crate.
//!
//! Typed HTTP clients for the external market data services the tracker
//! consumes, behind a single provider trait.
//!
//! # Overview
//!
//! - [`MarketDataProvider`] - the trait core services program against
//! - [`AlphaVantageProvider`] - quotes, symbol search, top movers, time series
//! - [`FinnhubProvider`] - quotes, symbol search, candles, company profiles
//! - [`MarketDataError`] / [`RetryClass`] - failure taxonomy with retry
//!   classification, plus [`retry_with_backoff`] for the rate-limited
//!   daily-history endpoint
//!
//! All providers are plain request/response JSON clients; nothing here owns a
//! wire format. API keys are passed in at construction and redacted from log
//! output.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use errors::retry::retry_with_backoff;

pub use models::{CompanyProfile, HistoryPoint, ProviderQuote, SearchHit, TopMovers};

pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::finnhub::FinnhubProvider;
pub use provider::MarketDataProvider;
