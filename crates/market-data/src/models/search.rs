//! Symbol search models.

use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
    /// Symbol/ticker (e.g. "AAPL")
    pub symbol: String,

    /// Display name (e.g. "Apple Inc")
    pub name: String,

    /// Security type as the provider reports it (e.g. "Equity", "Common Stock")
    pub asset_type: String,

    /// Region/market, empty when the provider does not report one
    pub region: String,

    /// Relevance score from the provider (higher = better match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a new search hit with required fields.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            asset_type: asset_type.into(),
            region: String::new(),
            score: None,
        }
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}
