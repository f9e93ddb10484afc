//! Time-boxed response cache
//!
//! Wraps a [`JsonFetcher`] with a per-URL reuse window. Entries are stored as
//! `{time, data}` under `cache:<url>` and reused while younger than
//! [`CACHE_TTL_MS`]. Entries are written with a KV expiration of
//! [`CACHE_EXPIRATION_SECS`], so the namespace only holds recently fetched
//! URLs; there is no size bound beyond that.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::JsonFetcher;
use crate::error::Result;
use crate::storage::{self, CACHE_PREFIX, KeyValueStore};

/// Reuse window for every cached URL (2 minutes)
pub const CACHE_TTL_MS: i64 = 120_000;

/// KV expiration of a cache entry. Once past the reuse window an entry is
/// never served again. Workers KV rejects TTLs under 60 s.
pub const CACHE_EXPIRATION_SECS: u64 = 120;

/// Source of "now" in epoch milliseconds
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<T: Clock> Clock for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// One cached response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Epoch millis at which the payload was fetched
    pub time: i64,
    pub data: Value,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: i64) -> bool {
        now - self.time < CACHE_TTL_MS
    }
}

/// Whether a lookup was answered from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Fetch-through cache over a key-value store
pub struct CacheLayer<S, F, C> {
    store: S,
    fetcher: F,
    clock: C,
}

impl<S, F, C> CacheLayer<S, F, C>
where
    S: KeyValueStore,
    F: JsonFetcher,
    C: Clock,
{
    pub fn new(store: S, fetcher: F, clock: C) -> Self {
        Self { store, fetcher, clock }
    }

    fn storage_key(url: &str) -> String {
        format!("{CACHE_PREFIX}{url}")
    }

    /// Fetch `url`, reusing a stored response younger than two minutes
    pub async fn fetch_cached(&self, url: &str) -> Result<Value> {
        self.fetch_with_status(url).await.map(|(data, _)| data)
    }

    /// Like [`fetch_cached`](Self::fetch_cached), also reporting hit or miss
    pub async fn fetch_with_status(&self, url: &str) -> Result<(Value, CacheStatus)> {
        let key = Self::storage_key(url);
        let now = self.clock.now_millis();

        match storage::get_json::<_, CacheEntry>(&self.store, &key).await {
            Ok(Some(entry)) if entry.is_fresh(now) => {
                log::debug!("Cache hit for {url} (age {}ms)", now - entry.time);
                return Ok((entry.data, CacheStatus::Hit));
            }
            Ok(_) => {}
            Err(e) => log::warn!("Ignoring unreadable cache entry for {url}: {e}"),
        }

        // A failed fetch leaves any previous entry untouched
        let data = self.fetcher.fetch_json(url).await?;

        let entry = CacheEntry {
            time: self.clock.now_millis(),
            data,
        };
        storage::put_json_expiring(&self.store, &key, &entry, CACHE_EXPIRATION_SECS).await?;
        log::debug!("Cached {url}");

        Ok((entry.data, CacheStatus::Miss))
    }
}
