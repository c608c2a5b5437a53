//! SQLite storage implementation for the error log.

mod model;
mod repository;

pub use model::ErrorLogDb;
pub use repository::ErrorLogRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::diagnostics::ErrorLogRepositoryTrait;
