//! The shared fetch/cache/fallback policy.
//!
//! Every remote-backed read in the application goes through
//! [`fetch_or_stale`]: serve the cached value while it is within its TTL,
//! otherwise fetch from the remote and write through, and on remote failure
//! fall back to the last stored value no matter how old it is. Only when
//! there is no stored value at all does the failure propagate.
//!
//! The cache itself is an injected [`KeyValueCache`] - sqlite-backed for
//! values that survive restarts (quotes, history), [`MemoryCache`] for
//! process-local ones (snapshot, predictions) - and time comes from an
//! injected [`Clock`] so tests can freeze it.
//!
//! Calls are independent: two concurrent requests for the same expired key
//! both hit the remote and the later write wins. There is deliberately no
//! single-flight coalescing here.

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::Result;

/// A cached payload with the timestamp it was stored at.
///
/// One entry per key; a newer write overwrites the older one (last write
/// wins, no versioning).
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    /// JSON-serialized value
    pub payload: String,
    pub stored_at: DateTime<Utc>,
}

/// Keyed cache of serialized payloads.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Get the entry for a key, fresh or stale.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Store an entry, replacing any previous one for the same key.
    async fn put(&self, entry: CacheEntry) -> Result<()>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// In-memory [`KeyValueCache`] for values that do not need to survive a
/// restart.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, entry: CacheEntry) -> Result<()> {
        self.entries.write().await.insert(entry.key.clone(), entry);
        Ok(())
    }
}

/// Decode a cached payload, treating undecodable payloads as absent.
/// A corrupt entry must never fail a read that could instead refetch.
fn decode<T: DeserializeOwned>(entry: &CacheEntry) -> Option<T> {
    match serde_json::from_str(&entry.payload) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("discarding undecodable cache entry for {}: {}", entry.key, err);
            None
        }
    }
}

/// Run the fetch/cache/fallback policy for one key.
///
/// - `!force_refresh` and the entry is within `ttl`: return it, no fetch.
/// - Otherwise run `fetch`:
///   - success: write exactly one cache entry stamped with the current time,
///     return the value;
///   - failure: return the stored entry if one exists (stale included),
///     otherwise propagate the fetch error.
///
/// A failed cache write after a successful fetch is logged and swallowed:
/// the caller still gets the fresh value.
pub async fn fetch_or_stale<T, F, Fut>(
    cache: &dyn KeyValueCache,
    clock: &dyn Clock,
    key: &str,
    ttl: Duration,
    force_refresh: bool,
    fetch: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let now = clock.now();
    let cached = cache.get(key).await?;

    if !force_refresh {
        if let Some(entry) = &cached {
            if now - entry.stored_at < ttl {
                if let Some(value) = decode(entry) {
                    return Ok(value);
                }
            }
        }
    }

    match fetch().await {
        Ok(value) => {
            match serde_json::to_string(&value) {
                Ok(payload) => {
                    if let Err(err) = cache
                        .put(CacheEntry {
                            key: key.to_string(),
                            payload,
                            stored_at: now,
                        })
                        .await
                    {
                        warn!("cache write for {} failed: {}", key, err);
                    }
                }
                Err(err) => warn!("cache encode for {} failed: {}", key, err),
            }
            Ok(value)
        }
        Err(err) => {
            if let Some(entry) = &cached {
                if let Some(value) = decode(entry) {
                    warn!("serving stale cache for {} after fetch failure: {}", key, err);
                    return Ok(value);
                }
            }
            Err(err)
        }
    }
}

/// Test support: a clock tests can move by hand. Shared by the service test
/// modules across the crate.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    pub(crate) struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub(crate) fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}
