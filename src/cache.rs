//! Persistent TTL cache for generated sections
//!
//! Destination insights and packing lists change slowly, so they are kept
//! in an on-disk keyspace between runs. Entries carry an absolute expiry;
//! expired entries are evicted on read. When no cache has been
//! initialized (library use, tests) every lookup is a miss and writes are
//! dropped.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_CACHE: OnceCell<SectionCache> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// On-disk cache with per-entry TTL
pub struct SectionCache {
    store: Keyspace,
}

fn read_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl SectionCache {
    fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("sections", fjall::KeyspaceCreateOptions::default)?;
        Ok(SectionCache { store })
    }

    /// Stores a serializable value with a time-to-live (TTL).
    #[tracing::instrument(name = "cache_put", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses and expired entries.
    #[tracing::instrument(name = "cache_get", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || read_from_store(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        if now < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// Initializes the global cache. Call once at startup.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = SectionCache::open(path)?;
    GLOBAL_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

// Global convenience API. Without an initialized cache, gets miss and
// puts are dropped, so library consumers need no cache directory.

pub async fn put<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    match GLOBAL_CACHE.get() {
        Some(cache) => cache.put(key, value, ttl).await,
        None => Ok(()),
    }
}

pub async fn get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    match GLOBAL_CACHE.get() {
        Some(cache) => cache.get(key).await,
        None => Ok(None),
    }
}

pub async fn remove(key: &str) -> Result<()> {
    match GLOBAL_CACHE.get() {
        Some(cache) => cache.remove(key).await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uninitialized_cache_reads_as_miss() {
        // The global cache is never initialized in unit tests
        let value: Option<String> = get("missing-key").await.unwrap();
        assert!(value.is_none());
        put("missing-key", "value".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        remove("missing-key").await.unwrap();
    }

    #[test]
    fn test_stored_entry_roundtrip() {
        let entry = StoredEntry {
            value: "packing list".to_string(),
            expires_at: 1_900_000_000,
        };
        let bytes = postcard::to_stdvec(&entry).unwrap();
        let decoded: StoredEntry<String> = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.value, "packing list");
        assert_eq!(decoded.expires_at, 1_900_000_000);
    }
}
