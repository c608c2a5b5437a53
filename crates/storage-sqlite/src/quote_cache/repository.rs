use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::QuoteCacheDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::quote_cache::dsl::*;
use stockpulse_core::cache::{CacheEntry, KeyValueCache};
use stockpulse_core::errors::Result;

pub struct QuoteCacheRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl QuoteCacheRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        QuoteCacheRepository { pool, writer }
    }
}

#[async_trait]
impl KeyValueCache for QuoteCacheRepository {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let row = quote_cache
            .filter(cache_key.eq(key))
            .first::<QuoteCacheDb>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.and_then(QuoteCacheDb::into_entry))
    }

    async fn put(&self, entry: CacheEntry) -> Result<()> {
        let row = QuoteCacheDb::from_entry(&entry);
        self.writer
            .exec(move |conn| {
                diesel::replace_into(quote_cache)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
