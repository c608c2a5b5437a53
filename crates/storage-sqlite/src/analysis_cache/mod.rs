//! SQLite storage implementation for cached analyses.

mod model;
mod repository;

pub use model::AnalysisCacheDb;
pub use repository::AnalysisCacheRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::analysis::AnalysisRepositoryTrait;
