use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::AnalysisCacheDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::analysis_cache::dsl::*;
use stockpulse_core::analysis::{AnalysisRepositoryTrait, StockAnalysis};
use stockpulse_core::errors::Result;

pub struct AnalysisCacheRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AnalysisCacheRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AnalysisCacheRepository { pool, writer }
    }
}

#[async_trait]
impl AnalysisRepositoryTrait for AnalysisCacheRepository {
    fn get(&self, sym: &str) -> Result<Option<StockAnalysis>> {
        let mut conn = get_connection(&self.pool)?;
        let row = analysis_cache
            .filter(symbol.eq(sym))
            .first::<AnalysisCacheDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.and_then(AnalysisCacheDb::into_analysis))
    }

    async fn upsert(&self, analysis: StockAnalysis) -> Result<()> {
        let row = AnalysisCacheDb::from_analysis(&analysis)?;
        self.writer
            .exec(move |conn| {
                diesel::replace_into(analysis_cache)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, sym: &str) -> Result<()> {
        let sym = sym.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(analysis_cache.filter(symbol.eq(sym)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::test_pool;
    use chrono::{DateTime, Duration, Utc};
    use stockpulse_core::analysis::Sentiment;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn analysis(sym: &str) -> StockAnalysis {
        StockAnalysis {
            symbol: sym.to_string(),
            summary: "Solid quarter.".to_string(),
            sentiment: Sentiment::Bullish,
            key_points: vec!["Strong margins".to_string()],
            generated_at: t0(),
            cached_until: t0() + Duration::hours(6),
        }
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = AnalysisCacheRepository::new(pool, writer);

        assert!(repo.get("AAPL").unwrap().is_none());

        repo.upsert(analysis("AAPL")).await.unwrap();
        let stored = repo.get("AAPL").unwrap().unwrap();
        assert_eq!(stored, analysis("AAPL"));
    }

    #[tokio::test]
    async fn upsert_replaces_the_previous_row() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = AnalysisCacheRepository::new(pool, writer);

        repo.upsert(analysis("AAPL")).await.unwrap();
        let mut newer = analysis("AAPL");
        newer.summary = "Even better.".to_string();
        repo.upsert(newer.clone()).await.unwrap();

        assert_eq!(repo.get("AAPL").unwrap().unwrap(), newer);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = AnalysisCacheRepository::new(pool, writer);

        repo.upsert(analysis("AAPL")).await.unwrap();
        repo.delete("AAPL").await.unwrap();

        assert!(repo.get("AAPL").unwrap().is_none());
        // Deleting an absent row is not an error
        repo.delete("AAPL").await.unwrap();
    }
}
