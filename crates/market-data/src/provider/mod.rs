//! Market data provider implementations.

pub mod alpha_vantage;
pub mod finnhub;
mod traits;

pub use traits::MarketDataProvider;
