//! In-app error log for diagnostics.
//!
//! Per-operation failures (a symbol that failed during snapshot aggregation,
//! a prediction pool fetch that errored) are recorded here instead of being
//! surfaced to the caller. Recording itself must never fail an operation.

mod model;
mod service;
mod traits;

pub use model::ErrorLogEntry;
pub use service::{ErrorLogService, ErrorLogServiceTrait};
pub use traits::ErrorLogRepositoryTrait;

/// Test support: an error log that records into memory. Shared by the
/// service test modules across the crate.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ErrorLogEntry, ErrorLogServiceTrait};
    use crate::errors::Result;

    #[derive(Default)]
    pub(crate) struct RecordingErrorLog {
        pub(crate) entries: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ErrorLogServiceTrait for RecordingErrorLog {
        async fn log(&self, tag: &str, message: &str, _detail: Option<String>) {
            self.entries
                .lock()
                .unwrap()
                .push((tag.to_string(), message.to_string()));
        }

        fn recent(&self, _limit: i64) -> Result<Vec<ErrorLogEntry>> {
            Ok(Vec::new())
        }

        fn count(&self) -> Result<i64> {
            Ok(self.entries.lock().unwrap().len() as i64)
        }

        async fn clear(&self) -> Result<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }
    }
}
