//! Repository trait for settings.

use async_trait::async_trait;

use crate::errors::Result;

/// Repository for the key/value settings store.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key.
    /// Returns `DatabaseError::NotFound` when the key has never been set.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Insert or replace a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
