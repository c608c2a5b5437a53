//! Data types returned by market data providers.

mod history;
mod profile;
mod quote;
mod search;

pub use history::HistoryPoint;
pub use profile::CompanyProfile;
pub use quote::{ProviderQuote, TopMovers};
pub use search::SearchHit;
