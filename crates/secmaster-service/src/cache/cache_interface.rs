//! Cache interface trait for hash-structured key-value stores.

use async_trait::async_trait;
use secmaster_core::{Interface, SecMasterResult};
use std::collections::HashMap;
use std::time::Duration;

/// Hash-structured cache store.
///
/// Every key holds a map of string fields to string values. Keys may carry a
/// TTL; expiry is passive and handled by the store itself.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get one field of a hash.
    ///
    /// Returns `None` if the key or field doesn't exist or has expired.
    async fn hash_get(&self, key: &str, field: &str) -> SecMasterResult<Option<String>>;

    /// Get every field of a hash. Missing keys yield an empty map.
    ///
    /// The service never reads whole layers; this is for inspecting what a
    /// load cycle wrote.
    async fn hash_get_all(&self, key: &str) -> SecMasterResult<HashMap<String, String>>;

    /// Set one field of a hash.
    async fn hash_put(&self, key: &str, field: &str, value: &str) -> SecMasterResult<()>;

    /// Set many fields of a hash in one call.
    async fn hash_put_all(&self, key: &str, entries: &HashMap<String, String>) -> SecMasterResult<()>;

    /// Delete a key.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> SecMasterResult<bool>;

    /// Delete several keys, returning how many existed.
    async fn delete_keys(&self, keys: &[String]) -> SecMasterResult<u64>;

    /// List keys matching a glob pattern (`*` and `?` wildcards).
    async fn keys(&self, pattern: &str) -> SecMasterResult<Vec<String>>;

    /// Set a key's time-to-live.
    ///
    /// Returns `false` if the key does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> SecMasterResult<bool>;
}

/// Extension trait with composite operations.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Delete every key matching a pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> SecMasterResult<u64> {
        let keys = self.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        self.delete_keys(&keys).await
    }

    /// Write a batch of hash fields and (re)set the key's TTL.
    async fn put_hash_with_ttl(
        &self,
        key: &str,
        entries: &HashMap<String, String>,
        ttl: Duration,
    ) -> SecMasterResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.hash_put_all(key, entries).await?;
        self.expire(key, ttl).await?;
        Ok(())
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
