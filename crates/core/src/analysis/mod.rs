//! AI-generated stock analysis with an explicit validity window.
//!
//! Unlike quotes, an analysis carries its own expiry written at generation
//! time, so the cache check compares against `cached_until` instead of a
//! TTL over the stored-at timestamp.

mod model;
mod service;
mod traits;

pub use model::StockAnalysis;
pub use stockpulse_ai::{GeneratedAnalysis, Sentiment};
pub use service::{AnalysisService, AnalysisServiceTrait};
pub use traits::AnalysisRepositoryTrait;
