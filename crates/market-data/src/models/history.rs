//! Price history models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single point in a price series. Providers return points ordered by
/// timestamp ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    /// Closing price for the interval
    pub price: Decimal,
    /// Traded volume for the interval, zero when not reported
    pub volume: i64,
}
