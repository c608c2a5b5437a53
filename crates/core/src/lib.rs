//! Stockpulse core crate.
//!
//! Domain models and services for the stock tracker. Everything here is
//! storage-agnostic: persistence goes through repository traits implemented
//! by `stockpulse-storage-sqlite`, network access goes through the provider
//! traits of `stockpulse-market-data` and `stockpulse-ai`.
//!
//! The shared behavior is the fetch/cache/fallback policy in [`cache`]:
//! serve fresh cache, otherwise fetch and write through, otherwise fall back
//! to the last stored value. Each service parameterizes it with its own key
//! space and TTL.

pub mod analysis;
pub mod cache;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod market;
pub mod portfolio;
pub mod predictions;
pub mod settings;

pub use errors::{DatabaseError, Error, Result};
