//! Analysis domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpulse_ai::{GeneratedAnalysis, Sentiment};

/// A generated analysis for one symbol, with its validity window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub symbol: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub key_points: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// After this instant the analysis is stale and a read regenerates it.
    pub cached_until: DateTime<Utc>,
}

impl StockAnalysis {
    pub fn from_generated(
        symbol: impl Into<String>,
        generated: GeneratedAnalysis,
        generated_at: DateTime<Utc>,
        cached_until: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            summary: generated.summary,
            sentiment: generated.sentiment,
            key_points: generated.key_points,
            generated_at,
            cached_until,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.cached_until
    }
}
