//! Portfolio holdings. Pure persistence, no caching.

mod model;
mod service;
mod traits;

pub use model::PortfolioHolding;
pub use service::{PortfolioService, PortfolioServiceTrait};
pub use traits::PortfolioRepositoryTrait;
