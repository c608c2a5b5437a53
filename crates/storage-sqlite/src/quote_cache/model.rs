//! Database model for cached payloads.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::warn;

use stockpulse_core::cache::CacheEntry;

/// One row of `quote_cache`: a serialized payload and when it was stored.
/// Timestamps are RFC 3339 strings.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::quote_cache)]
pub struct QuoteCacheDb {
    pub cache_key: String,
    pub payload: String,
    pub stored_at: String,
}

impl QuoteCacheDb {
    pub fn from_entry(entry: &CacheEntry) -> Self {
        Self {
            cache_key: entry.key.clone(),
            payload: entry.payload.clone(),
            stored_at: entry.stored_at.to_rfc3339(),
        }
    }

    /// Decode the stored row. A corrupt `stored_at` reads as absent so the
    /// entry refetches instead of erroring, matching how undecodable
    /// payloads are handled upstream.
    pub fn into_entry(self) -> Option<CacheEntry> {
        match DateTime::parse_from_rfc3339(&self.stored_at) {
            Ok(ts) => Some(CacheEntry {
                key: self.cache_key,
                payload: self.payload,
                stored_at: ts.with_timezone(&Utc),
            }),
            Err(err) => {
                warn!("discarding cache row {} with bad stored_at: {}", self.cache_key, err);
                None
            }
        }
    }
}
