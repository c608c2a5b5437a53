//! SQLite storage implementation for the search history.

mod model;
mod repository;

pub use model::SearchHistoryDb;
pub use repository::SearchHistoryRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::market::SearchHistoryRepositoryTrait;
