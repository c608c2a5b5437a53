//! Error log service.

use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use super::{ErrorLogEntry, ErrorLogRepositoryTrait};
use crate::cache::Clock;
use crate::errors::Result;

/// Service trait for the in-app error log.
#[async_trait]
pub trait ErrorLogServiceTrait: Send + Sync {
    /// Record a failure. Never returns an error: a diagnostics write that
    /// fails is logged to the process log and dropped, so it cannot fail the
    /// operation that was being diagnosed.
    async fn log(&self, tag: &str, message: &str, detail: Option<String>);

    fn recent(&self, limit: i64) -> Result<Vec<ErrorLogEntry>>;

    fn count(&self) -> Result<i64>;

    async fn clear(&self) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

pub struct ErrorLogService {
    repository: Arc<dyn ErrorLogRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl ErrorLogService {
    pub fn new(repository: Arc<dyn ErrorLogRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl ErrorLogServiceTrait for ErrorLogService {
    async fn log(&self, tag: &str, message: &str, detail: Option<String>) {
        let entry = ErrorLogEntry::new(self.clock.now(), tag, message, detail);
        if let Err(err) = self.repository.insert(entry).await {
            error!("failed to persist error log entry from {}: {}", tag, err);
        }
    }

    fn recent(&self, limit: i64) -> Result<Vec<ErrorLogEntry>> {
        self.repository.recent(limit)
    }

    fn count(&self) -> Result<i64> {
        self.repository.count()
    }

    async fn clear(&self) -> Result<()> {
        self.repository.clear().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }
}
