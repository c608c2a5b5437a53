//! Repository trait for cached analyses.

use async_trait::async_trait;

use super::StockAnalysis;
use crate::errors::Result;

/// Repository for persisted analyses, one per symbol.
#[async_trait]
pub trait AnalysisRepositoryTrait: Send + Sync {
    /// Stored analysis for a symbol, valid or expired.
    fn get(&self, symbol: &str) -> Result<Option<StockAnalysis>>;

    /// Store an analysis, replacing any previous one for the symbol.
    async fn upsert(&self, analysis: StockAnalysis) -> Result<()>;

    /// Delete the stored analysis for a symbol, if any.
    async fn delete(&self, symbol: &str) -> Result<()>;
}
