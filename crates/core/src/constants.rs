//! Cache lifetimes and retry settings shared across services.

use std::time::Duration as StdDuration;

use chrono::Duration;

/// How long a market snapshot stays fresh.
pub fn snapshot_ttl() -> Duration {
    Duration::minutes(5)
}

/// How long a single quote stays fresh. Much shorter than the snapshot:
/// quotes back the detail screen where staleness is most visible.
pub fn quote_ttl() -> Duration {
    Duration::seconds(60)
}

/// How long a price history series stays fresh.
pub fn history_ttl() -> Duration {
    Duration::days(1)
}

/// How long prediction lists stay fresh.
pub fn predictions_ttl() -> Duration {
    Duration::minutes(10)
}

/// Validity window written into each generated analysis.
pub fn analysis_validity() -> Duration {
    Duration::hours(6)
}

/// Attempts for the rate-limited daily history endpoint.
pub const HISTORY_RETRY_ATTEMPTS: u32 = 3;

/// Base delay for the daily history retry loop; attempt `n` waits `n` times
/// this long.
pub const HISTORY_RETRY_BASE_DELAY: StdDuration = StdDuration::from_secs(2);

/// Setting key for the market data provider API key.
pub const SETTING_MARKET_DATA_API_KEY: &str = "market_data_api_key";

/// Setting key for the AI provider API key.
pub const SETTING_AI_API_KEY: &str = "ai_api_key";

/// Candidate symbols used to aggregate a market snapshot when the provider
/// has no top-movers endpoint. Large, liquid US names so per-symbol quote
/// calls rarely come back empty.
pub const SNAPSHOT_CANDIDATES: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "META", "TSLA", "AVGO", "AMD", "CRM",
    "COST", "LLY", "INTC", "PLTR", "COIN", "F", "BAC", "T", "PFE", "AAL",
];
