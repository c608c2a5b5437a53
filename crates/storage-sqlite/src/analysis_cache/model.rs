//! Database model for cached analyses.

use diesel::prelude::*;
use log::warn;

use stockpulse_core::analysis::StockAnalysis;
use stockpulse_core::errors::{DatabaseError, Error, Result};

/// One row of `analysis_cache`. The payload is the serialized
/// [`StockAnalysis`]; the timestamp columns duplicate its
/// `generated_at`/`cached_until` as queryable RFC 3339 strings.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::analysis_cache)]
pub struct AnalysisCacheDb {
    pub symbol: String,
    pub payload: String,
    pub generated_at: String,
    pub expires_at: String,
}

impl AnalysisCacheDb {
    pub fn from_analysis(analysis: &StockAnalysis) -> Result<Self> {
        let payload = serde_json::to_string(analysis)
            .map_err(|e| Error::Database(DatabaseError::Internal(e.to_string())))?;
        Ok(Self {
            symbol: analysis.symbol.clone(),
            payload,
            generated_at: analysis.generated_at.to_rfc3339(),
            expires_at: analysis.cached_until.to_rfc3339(),
        })
    }

    /// Decode the stored payload. An undecodable row reads as absent so a
    /// corrupt cache regenerates instead of erroring.
    pub fn into_analysis(self) -> Option<StockAnalysis> {
        match serde_json::from_str(&self.payload) {
            Ok(analysis) => Some(analysis),
            Err(err) => {
                warn!("discarding undecodable analysis for {}: {}", self.symbol, err);
                None
            }
        }
    }
}
