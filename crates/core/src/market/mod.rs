//! Market data domain: quotes, snapshots, price history, symbol search.

mod model;
mod service;
mod snapshot;
mod traits;

pub use model::{MarketSnapshot, PriceHistory, PricePoint, Stock, SymbolMatch, TimeRange};
pub use service::{MarketService, MarketServiceTrait};
pub use snapshot::partition_snapshot;
pub use traits::SearchHistoryRepositoryTrait;
