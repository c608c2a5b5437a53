//! Prediction domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::market::Stock;

/// Signal source a prediction algorithm draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    WebSearch,
    TwitterTrends,
    StockPerformance,
    NewsSentiment,
    VolumeAnalysis,
}

impl SignalType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SignalType::WebSearch => "Web Search Trends",
            SignalType::TwitterTrends => "Twitter/X Trends",
            SignalType::StockPerformance => "Stock Performance",
            SignalType::NewsSentiment => "News Sentiment",
            SignalType::VolumeAnalysis => "Volume Analysis",
        }
    }
}

/// A prediction algorithm descriptor from the static catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Algorithm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub signals: Vec<SignalType>,
    /// Historical accuracy, when known
    pub accuracy: Option<f64>,
}

/// One predicted stock from an algorithm run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub stock: Stock,
    pub algorithm: Algorithm,
    /// In [0.6, 0.95)
    pub confidence: f64,
    /// Why this stock was picked
    pub signal: String,
    pub predicted_at: DateTime<Utc>,
}
