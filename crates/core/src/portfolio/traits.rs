//! Repository trait for portfolio holdings.

use async_trait::async_trait;

use super::PortfolioHolding;
use crate::errors::Result;

/// Repository for persisted holdings.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// All holdings, newest purchase first.
    fn holdings(&self) -> Result<Vec<PortfolioHolding>>;

    /// Holdings for one symbol, newest purchase first.
    fn holdings_for_symbol(&self, symbol: &str) -> Result<Vec<PortfolioHolding>>;

    async fn insert(&self, holding: PortfolioHolding) -> Result<()>;

    /// Delete a holding by id; `NotFound` when no such row exists.
    async fn delete(&self, id: &str) -> Result<()>;
}
