//! SQLite storage implementation for portfolio holdings.

mod model;
mod repository;

pub use model::PortfolioHoldingDb;
pub use repository::PortfolioRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::portfolio::PortfolioRepositoryTrait;
