//! SQLite storage implementation for the quote/history cache.

mod model;
mod repository;

pub use model::QuoteCacheDb;
pub use repository::QuoteCacheRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::cache::KeyValueCache;
