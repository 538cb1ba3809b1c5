//! Response caching for read-mostly endpoints.
//!
//! Caching is layered: [`CacheStore`] is the raw key/value surface (an
//! injectable seam, defaulting to [`InMemoryCache`]), and [`ResponseCache`]
//! adds the policy — enablement, key namespacing, default TTL, and the
//! `get_or_compute` / invalidation operations the resource façades use.
//!
//! Expiry is passive: entries are checked against their deadline at read
//! time, never by a background task. Entries are replaced whole under the
//! store's lock, so concurrent writers race at entry granularity and the
//! last writer wins.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{config::CacheConfig, error::Result};

/// Raw cache storage.
///
/// Implementations must be safe for concurrent use; the provided
/// [`InMemoryCache`] serializes access through a single mutex.
pub trait CacheStore: Send + Sync {
    /// Returns the live value for `key`, if present and unexpired.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` with the given time-to-live, replacing
    /// any existing entry.
    fn put(&self, key: &str, value: Value, ttl: Duration);

    /// Removes the entry for `key`, if any.
    fn remove(&self, key: &str);

    /// Removes every entry whose key starts with `prefix`.
    fn remove_prefix(&self, prefix: &str);
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Instant,
}

/// Process-local cache store backed by a mutex-guarded map.
///
/// Expired entries are dropped lazily when a read touches them.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned lock only means a panic mid-insert; the map itself is
        // still structurally sound.
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CacheStore for InMemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, value: Value, ttl: Duration) {
        let entry = Entry { value, expires_at: Instant::now() + ttl };
        self.lock().insert(key.to_owned(), entry);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn remove_prefix(&self, prefix: &str) {
        self.lock().retain(|key, _| !key.starts_with(prefix));
    }
}

/// Cache policy over a [`CacheStore`].
///
/// Keys are namespaced under the configured prefix so several clients can
/// share one store without collisions.
pub struct ResponseCache {
    enabled: bool,
    prefix: String,
    default_ttl: Duration,
    store: Arc<dyn CacheStore>,
}

impl ResponseCache {
    /// Creates a cache over a fresh [`InMemoryCache`].
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryCache::new()))
    }

    /// Creates a cache over a caller-supplied store.
    #[must_use]
    pub fn with_store(config: &CacheConfig, store: Arc<dyn CacheStore>) -> Self {
        Self {
            enabled: config.enabled,
            prefix: config.prefix.clone(),
            default_ttl: Duration::from_secs(config.ttl_secs),
            store,
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a
    /// miss.
    ///
    /// When caching is disabled this is a plain call to `compute`. A cached
    /// value that no longer decodes as `T` is treated as a miss. Compute
    /// failures are never cached.
    ///
    /// # Errors
    ///
    /// Propagates whatever `compute` returns.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.enabled {
            return compute().await;
        }

        let full_key = self.full_key(key);
        if let Some(hit) = self.store.get(&full_key)
            && let Ok(value) = serde_json::from_value(hit)
        {
            return Ok(value);
        }

        let value = compute().await?;
        if let Ok(raw) = serde_json::to_value(&value) {
            self.store.put(&full_key, raw, ttl.unwrap_or(self.default_ttl));
        }
        Ok(value)
    }

    /// Removes a single cached entry.
    pub fn invalidate(&self, key: &str) {
        if self.enabled {
            self.store.remove(&self.full_key(key));
        }
    }

    /// Removes every cached entry in a key family.
    ///
    /// Mutations call this with the family name (e.g. `"plans"`) so stale
    /// list pages disappear along with the individual entry.
    pub fn invalidate_family(&self, family: &str) {
        if self.enabled {
            self.store.remove_prefix(&self.full_key(family));
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{key}", self.prefix)
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("enabled", &self.enabled)
            .field("prefix", &self.prefix)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Builds a stable cache key for a list endpoint from its query pairs.
///
/// Pairs are sorted so logically identical queries share one key regardless
/// of construction order.
#[must_use]
pub fn list_key(family: &str, query: &[(String, String)]) -> String {
    let mut pairs: Vec<String> =
        query.iter().map(|(key, value)| format!("{key}={value}")).collect();
    pairs.sort();
    format!("{family}:{}", pairs.join("&"))
}
