//! Database model for error log entries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use stockpulse_core::diagnostics::ErrorLogEntry;
use stockpulse_core::errors::{DatabaseError, Error, Result};

/// One row of `error_log`.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::error_log)]
pub struct ErrorLogDb {
    pub id: String,
    pub timestamp: String,
    pub tag: String,
    pub message: String,
    pub detail: Option<String>,
}

impl ErrorLogDb {
    pub fn from_entry(entry: &ErrorLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp.to_rfc3339(),
            tag: entry.tag.clone(),
            message: entry.message.clone(),
            detail: entry.detail.clone(),
        }
    }

    pub fn into_entry(self) -> Result<ErrorLogEntry> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| {
                Error::Database(DatabaseError::Internal(format!(
                    "bad timestamp for error log entry {}: {}",
                    self.id, e
                )))
            })?
            .with_timezone(&Utc);

        Ok(ErrorLogEntry {
            id: self.id,
            timestamp,
            tag: self.tag,
            message: self.message,
            detail: self.detail,
        })
    }
}
