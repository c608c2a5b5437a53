//! Portfolio domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchased lot of a stock. A symbol can appear in several holdings
/// bought at different times and prices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    pub id: String,
    pub symbol: String,
    pub company_name: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: DateTime<Utc>,
}

impl PortfolioHolding {
    /// What was paid for this lot.
    pub fn total_cost(&self) -> Decimal {
        self.shares * self.purchase_price
    }

    /// What the lot is worth at the given price.
    pub fn current_value(&self, current_price: Decimal) -> Decimal {
        self.shares * current_price
    }

    pub fn gain_loss(&self, current_price: Decimal) -> Decimal {
        self.current_value(current_price) - self.total_cost()
    }

    /// Gain/loss as a percentage of cost; zero-cost lots report zero.
    pub fn gain_loss_percent(&self, current_price: Decimal) -> Decimal {
        let cost = self.total_cost();
        if cost.is_zero() {
            return Decimal::ZERO;
        }
        self.gain_loss(current_price) / cost * Decimal::ONE_HUNDRED
    }
}
