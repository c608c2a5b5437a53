//! SQLite storage implementation for stockpulse.
//!
//! The only crate that depends on Diesel. It implements the repository
//! traits defined in `stockpulse-core`:
//! - connection pooling over a WAL-mode sqlite file
//! - a single-writer actor so writes never contend
//! - embedded migrations
//! - one repository module per table

pub mod db;
pub mod errors;
pub mod schema;

pub mod analysis_cache;
pub mod error_log;
pub mod portfolio;
pub mod quote_cache;
pub mod search_history;
pub mod settings;

pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};
pub use errors::{IntoCore, StorageError};

pub use analysis_cache::AnalysisCacheRepository;
pub use error_log::ErrorLogRepository;
pub use portfolio::PortfolioRepository;
pub use quote_cache::QuoteCacheRepository;
pub use search_history::SearchHistoryRepository;
pub use settings::SettingsRepository;

// Re-export from stockpulse-core for convenience
pub use stockpulse_core::errors::{DatabaseError, Error, Result};
