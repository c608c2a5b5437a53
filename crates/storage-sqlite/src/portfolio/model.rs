//! Database model for portfolio holdings.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use stockpulse_core::errors::{DatabaseError, Error, Result};
use stockpulse_core::portfolio::PortfolioHolding;

/// One row of `portfolio_holdings`. Decimals and timestamps are stored as
/// text; SQLite floats would lose precision on share counts and prices.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_holdings)]
pub struct PortfolioHoldingDb {
    pub id: String,
    pub symbol: String,
    pub company_name: String,
    pub shares: String,
    pub purchase_price: String,
    pub purchase_date: String,
}

fn bad_column(row_id: &str, column: &str, err: impl std::fmt::Display) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "bad {} for holding {}: {}",
        column, row_id, err
    )))
}

impl PortfolioHoldingDb {
    pub fn from_holding(holding: &PortfolioHolding) -> Self {
        Self {
            id: holding.id.clone(),
            symbol: holding.symbol.clone(),
            company_name: holding.company_name.clone(),
            shares: holding.shares.to_string(),
            purchase_price: holding.purchase_price.to_string(),
            purchase_date: holding.purchase_date.to_rfc3339(),
        }
    }

    pub fn into_holding(self) -> Result<PortfolioHolding> {
        let shares =
            Decimal::from_str(&self.shares).map_err(|e| bad_column(&self.id, "shares", e))?;
        let purchase_price = Decimal::from_str(&self.purchase_price)
            .map_err(|e| bad_column(&self.id, "purchase_price", e))?;
        let purchase_date = DateTime::parse_from_rfc3339(&self.purchase_date)
            .map_err(|e| bad_column(&self.id, "purchase_date", e))?
            .with_timezone(&Utc);

        Ok(PortfolioHolding {
            id: self.id,
            symbol: self.symbol,
            company_name: self.company_name,
            shares,
            purchase_price,
            purchase_date,
        })
    }
}
