//! Settings service: typed access to the two API keys.

use std::sync::Arc;

use async_trait::async_trait;

use super::SettingsRepositoryTrait;
use crate::constants::{SETTING_AI_API_KEY, SETTING_MARKET_DATA_API_KEY};
use crate::errors::{DatabaseError, Error, Result};

/// Service trait for application settings.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Market data provider API key; empty string when unset.
    fn market_data_api_key(&self) -> Result<String>;

    /// AI provider API key; empty string when unset.
    fn ai_api_key(&self) -> Result<String>;

    async fn set_market_data_api_key(&self, key: &str) -> Result<()>;

    async fn set_ai_api_key(&self, key: &str) -> Result<()>;

    /// True when both keys are configured and non-blank.
    fn has_api_keys(&self) -> Result<bool>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self {
            settings_repository,
        }
    }

    /// Read a setting, mapping "never set" to an empty string.
    fn get_or_empty(&self, key: &str) -> Result<String> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(value),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn market_data_api_key(&self) -> Result<String> {
        self.get_or_empty(SETTING_MARKET_DATA_API_KEY)
    }

    fn ai_api_key(&self) -> Result<String> {
        self.get_or_empty(SETTING_AI_API_KEY)
    }

    async fn set_market_data_api_key(&self, key: &str) -> Result<()> {
        self.settings_repository
            .update_setting(SETTING_MARKET_DATA_API_KEY, key)
            .await
    }

    async fn set_ai_api_key(&self, key: &str) -> Result<()> {
        self.settings_repository
            .update_setting(SETTING_AI_API_KEY, key)
            .await
    }

    fn has_api_keys(&self) -> Result<bool> {
        Ok(!self.market_data_api_key()?.trim().is_empty()
            && !self.ai_api_key()?.trim().is_empty())
    }
}
