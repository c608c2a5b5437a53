use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::AppSettingDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use stockpulse_core::errors::{DatabaseError, Error, Result};
use stockpulse_core::settings::SettingsRepositoryTrait;

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_setting(&self, key: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(key.to_string())))
    }

    async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        let row = AppSettingDb {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings)
                    .values(&row)
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

    #[tokio::test]
    async fn settings_round_trip() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = SettingsRepository::new(pool, writer);

        assert!(matches!(
            repo.get_setting("market_data_api_key"),
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));

        repo.update_setting("market_data_api_key", "abc123")
            .await
            .unwrap();
        assert_eq!(repo.get_setting("market_data_api_key").unwrap(), "abc123");

        // Replace wins
        repo.update_setting("market_data_api_key", "def456")
            .await
            .unwrap();
        assert_eq!(repo.get_setting("market_data_api_key").unwrap(), "def456");
    }
}
