use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::PortfolioHoldingDb;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolio_holdings::dsl::*;
use stockpulse_core::errors::{DatabaseError, Error, Result};
use stockpulse_core::portfolio::{PortfolioHolding, PortfolioRepositoryTrait};

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PortfolioRepository { pool, writer }
    }

    fn load(&self, rows: Vec<PortfolioHoldingDb>) -> Result<Vec<PortfolioHolding>> {
        rows.into_iter()
            .map(PortfolioHoldingDb::into_holding)
            .collect()
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn holdings(&self) -> Result<Vec<PortfolioHolding>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_holdings
            .order(purchase_date.desc())
            .load::<PortfolioHoldingDb>(&mut conn)
            .map_err(StorageError::from)?;
        self.load(rows)
    }

    fn holdings_for_symbol(&self, sym: &str) -> Result<Vec<PortfolioHolding>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_holdings
            .filter(symbol.eq(sym))
            .order(purchase_date.desc())
            .load::<PortfolioHoldingDb>(&mut conn)
            .map_err(StorageError::from)?;
        self.load(rows)
    }

    async fn insert(&self, holding: PortfolioHolding) -> Result<()> {
        let row = PortfolioHoldingDb::from_holding(&holding);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(portfolio_holdings)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, holding_id: &str) -> Result<()> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(portfolio_holdings.filter(id.eq(&holding_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(holding_id)));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::test_pool;
    use chrono::{DateTime, Duration, Utc};
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn holding(holding_id: &str, sym: &str, purchased: DateTime<Utc>) -> PortfolioHolding {
        PortfolioHolding {
            id: holding_id.to_string(),
            symbol: sym.to_string(),
            company_name: format!("{} Inc", sym),
            shares: dec!(2.5),
            purchase_price: dec!(150.25),
            purchase_date: purchased,
        }
    }

    #[tokio::test]
    async fn insert_and_list_orders_newest_first() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = PortfolioRepository::new(pool, writer);

        repo.insert(holding("h1", "AAPL", t0())).await.unwrap();
        repo.insert(holding("h2", "MSFT", t0() + Duration::days(1)))
            .await
            .unwrap();

        let all = repo.holdings().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "h2");
        assert_eq!(all[1].shares, dec!(2.5));
        assert_eq!(all[1].purchase_price, dec!(150.25));
    }

    #[tokio::test]
    async fn holdings_for_symbol_filters() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = PortfolioRepository::new(pool, writer);

        repo.insert(holding("h1", "AAPL", t0())).await.unwrap();
        repo.insert(holding("h2", "AAPL", t0() + Duration::days(1)))
            .await
            .unwrap();
        repo.insert(holding("h3", "MSFT", t0())).await.unwrap();

        let apple = repo.holdings_for_symbol("AAPL").unwrap();
        assert_eq!(apple.len(), 2);
        assert!(apple.iter().all(|h| h.symbol == "AAPL"));
        assert!(repo.holdings_for_symbol("NVDA").unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_holding_is_not_found() {
        let (pool, writer, _dir) = test_pool().await;
        let repo = PortfolioRepository::new(pool, writer);

        repo.insert(holding("h1", "AAPL", t0())).await.unwrap();
        repo.delete("h1").await.unwrap();

        assert!(matches!(
            repo.delete("h1").await,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }
}
