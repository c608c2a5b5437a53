//! Error log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Component that logged the failure (e.g. "MarketService")
    pub tag: String,
    pub message: String,
    /// Underlying error text, when there is one
    pub detail: Option<String>,
}

impl ErrorLogEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        tag: impl Into<String>,
        message: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            tag: tag.into(),
            message: message.into(),
            detail,
        }
    }
}
