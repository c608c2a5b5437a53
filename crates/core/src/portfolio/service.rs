//! Portfolio service.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::PortfolioHolding;
use super::traits::PortfolioRepositoryTrait;
use crate::cache::Clock;
use crate::errors::Result;

/// Service trait for the portfolio.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn holdings(&self) -> Result<Vec<PortfolioHolding>>;

    fn holdings_for_symbol(&self, symbol: &str) -> Result<Vec<PortfolioHolding>>;

    /// Record a new purchase. The id and purchase date are assigned here.
    async fn add_holding(
        &self,
        symbol: &str,
        company_name: &str,
        shares: Decimal,
        purchase_price: Decimal,
    ) -> Result<PortfolioHolding>;

    async fn remove_holding(&self, id: &str) -> Result<()>;

    /// Whether the symbol appears in at least one holding.
    fn contains(&self, symbol: &str) -> Result<bool>;
}

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn holdings(&self) -> Result<Vec<PortfolioHolding>> {
        self.repository.holdings()
    }

    fn holdings_for_symbol(&self, symbol: &str) -> Result<Vec<PortfolioHolding>> {
        self.repository.holdings_for_symbol(symbol)
    }

    async fn add_holding(
        &self,
        symbol: &str,
        company_name: &str,
        shares: Decimal,
        purchase_price: Decimal,
    ) -> Result<PortfolioHolding> {
        let holding = PortfolioHolding {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            company_name: company_name.to_string(),
            shares,
            purchase_price,
            purchase_date: self.clock.now(),
        };
        self.repository.insert(holding.clone()).await?;
        Ok(holding)
    }

    async fn remove_holding(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }

    fn contains(&self, symbol: &str) -> Result<bool> {
        Ok(!self.repository.holdings_for_symbol(symbol)?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::cache::testing::ManualClock;
    use crate::errors::{DatabaseError, Error};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[derive(Default)]
    struct MockPortfolioRepository {
        holdings: Mutex<Vec<PortfolioHolding>>,
    }

    #[async_trait]
    impl PortfolioRepositoryTrait for MockPortfolioRepository {
        fn holdings(&self) -> Result<Vec<PortfolioHolding>> {
            Ok(self.holdings.lock().unwrap().clone())
        }

        fn holdings_for_symbol(&self, symbol: &str) -> Result<Vec<PortfolioHolding>> {
            Ok(self
                .holdings
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.symbol == symbol)
                .cloned()
                .collect())
        }

        async fn insert(&self, holding: PortfolioHolding) -> Result<()> {
            self.holdings.lock().unwrap().push(holding);
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            let mut holdings = self.holdings.lock().unwrap();
            let before = holdings.len();
            holdings.retain(|h| h.id != id);
            if holdings.len() == before {
                return Err(Error::Database(DatabaseError::NotFound(id.to_string())));
            }
            Ok(())
        }
    }

    fn service() -> (PortfolioService, Arc<MockPortfolioRepository>) {
        let repo = Arc::new(MockPortfolioRepository::default());
        let svc = PortfolioService::new(repo.clone(), Arc::new(ManualClock::new(t0())));
        (svc, repo)
    }

    #[tokio::test]
    async fn add_holding_assigns_id_and_purchase_date() {
        let (svc, repo) = service();

        let holding = svc
            .add_holding("AAPL", "Apple Inc", dec!(5), dec!(150))
            .await
            .unwrap();

        assert!(!holding.id.is_empty());
        assert_eq!(holding.purchase_date, t0());
        assert_eq!(repo.holdings().unwrap(), vec![holding]);
    }

    #[tokio::test]
    async fn contains_reflects_holdings() {
        let (svc, _repo) = service();
        assert!(!svc.contains("AAPL").unwrap());

        svc.add_holding("AAPL", "Apple Inc", dec!(1), dec!(100))
            .await
            .unwrap();

        assert!(svc.contains("AAPL").unwrap());
        assert!(!svc.contains("MSFT").unwrap());
    }

    #[tokio::test]
    async fn remove_holding_deletes_by_id() {
        let (svc, _repo) = service();
        let holding = svc
            .add_holding("AAPL", "Apple Inc", dec!(1), dec!(100))
            .await
            .unwrap();

        svc.remove_holding(&holding.id).await.unwrap();

        assert!(svc.holdings().unwrap().is_empty());
        assert!(matches!(
            svc.remove_holding(&holding.id).await,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }
}
