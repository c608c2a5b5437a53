//! Repository trait for the error log.

use async_trait::async_trait;

use super::ErrorLogEntry;
use crate::errors::Result;

/// Repository for persisted error log entries.
#[async_trait]
pub trait ErrorLogRepositoryTrait: Send + Sync {
    async fn insert(&self, entry: ErrorLogEntry) -> Result<()>;

    /// Most recent entries, newest first.
    fn recent(&self, limit: i64) -> Result<Vec<ErrorLogEntry>>;

    fn count(&self) -> Result<i64>;

    async fn clear(&self) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}
