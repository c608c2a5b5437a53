use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::model::SearchHistoryDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::search_history::dsl::*;
use stockpulse_core::errors::Result;
use stockpulse_core::market::SearchHistoryRepositoryTrait;

pub struct SearchHistoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SearchHistoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SearchHistoryRepository { pool, writer }
    }
}

#[async_trait]
impl SearchHistoryRepositoryTrait for SearchHistoryRepository {
    async fn save_search(&self, query: &str) -> Result<()> {
        let row = SearchHistoryDb {
            id: Uuid::new_v4().to_string(),
            search_query: query.to_string(),
            searched_at: Utc::now().to_rfc3339(),
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(search_history)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn recent_searches(&self, limit: i64) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let queries: Vec<String> = search_history
            .order(searched_at.desc())
            .select(search_query)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        // Distinct by query, keeping the newest occurrence's position
        let mut seen = std::collections::HashSet::new();
        Ok(queries
            .into_iter()
            .filter(|q| seen.insert(q.clone()))
            .take(limit as usize)
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        self.writer
            .exec(move |conn| {
                diesel::delete(search_history)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
