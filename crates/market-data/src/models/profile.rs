//! Company profile model.

use serde::{Deserialize, Serialize};

/// Company profile information, used to resolve display names for symbols.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    /// Company name; empty when the provider has none
    pub name: String,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    /// Market capitalization in millions
    pub market_cap: Option<f64>,
}
