//! Repository traits for the market domain.

use async_trait::async_trait;

use crate::errors::Result;

/// Repository for recent search queries.
#[async_trait]
pub trait SearchHistoryRepositoryTrait: Send + Sync {
    /// Record a search query with the current time.
    async fn save_search(&self, query: &str) -> Result<()>;

    /// Most recent distinct queries, newest first.
    fn recent_searches(&self, limit: i64) -> Result<Vec<String>>;

    /// Delete all recorded searches.
    async fn clear(&self) -> Result<()>;
}
