use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::ErrorLogDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::error_log::dsl::*;
use stockpulse_core::diagnostics::{ErrorLogEntry, ErrorLogRepositoryTrait};
use stockpulse_core::errors::Result;

pub struct ErrorLogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ErrorLogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ErrorLogRepository { pool, writer }
    }
}

#[async_trait]
impl ErrorLogRepositoryTrait for ErrorLogRepository {
    async fn insert(&self, entry: ErrorLogEntry) -> Result<()> {
        let row = ErrorLogDb::from_entry(&entry);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(error_log)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn recent(&self, limit: i64) -> Result<Vec<ErrorLogEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = error_log
            .order(timestamp.desc())
            .limit(limit)
            .load::<ErrorLogDb>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(ErrorLogDb::into_entry).collect()
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        error_log
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)
            .map_err(Into::into)
    }

    async fn clear(&self) -> Result<()> {
        self.writer
            .exec(move |conn| {
                diesel::delete(error_log)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, entry_id: &str) -> Result<()> {
        let entry_id = entry_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(error_log.filter(id.eq(entry_id)))
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

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn entry(at: DateTime<Utc>, msg: &str) -> ErrorLogEntry {
        ErrorLogEntry::new(at, "MarketService", msg, Some("detail".to_string()))
    }

    #[tokio::test]
    async fn recent_returns_newest_first_up_to_limit() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = ErrorLogRepository::new(pool, writer);

        repo.insert(entry(t0(), "first")).await.unwrap();
        repo.insert(entry(t0() + Duration::minutes(1), "second"))
            .await
            .unwrap();
        repo.insert(entry(t0() + Duration::minutes(2), "third"))
            .await
            .unwrap();

        let recent = repo.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "third");
        assert_eq!(recent[1].message, "second");
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_removes_one_entry() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = ErrorLogRepository::new(pool, writer);

        let e = entry(t0(), "only");
        let e_id = e.id.clone();
        repo.insert(e).await.unwrap();
        repo.delete(&e_id).await.unwrap();

        assert_eq!(repo.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = ErrorLogRepository::new(pool, writer);

        repo.insert(entry(t0(), "a")).await.unwrap();
        repo.insert(entry(t0(), "b")).await.unwrap();
        repo.clear().await.unwrap();

        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.recent(10).unwrap().is_empty());
    }
}
