//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use secmaster_config::RedisConfig;
use secmaster_core::{SecMasterError, SecMasterResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Create a Redis connection pool and probe it with a `PING`.
///
/// An unreachable server is logged, not returned: connections are retried on
/// every cache call, and lookups treat store errors as misses.
pub async fn create_redis_pool(config: &RedisConfig) -> SecMasterResult<Arc<Pool>> {
    info!("Creating Redis connection pool...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| SecMasterError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| SecMasterError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

    match ping(&pool).await {
        Ok(()) => info!("Redis connection pool created successfully"),
        Err(e) => warn!(error = %e, "Redis unreachable, continuing without a verified connection"),
    }

    Ok(Arc::new(pool))
}

async fn ping(pool: &Pool) -> SecMasterResult<()> {
    let mut conn = pool
        .get()
        .await
        .map_err(|e| SecMasterError::cache(format!("Failed to get Redis connection: {}", e)))?;
    deadpool_redis::redis::cmd("PING")
        .query_async::<String>(&mut *conn)
        .await
        .map_err(|e| SecMasterError::cache(format!("Redis PING failed: {}", e)))?;
    Ok(())
}

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Arc<Pool>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> SecMasterResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn hash_get(&self, key: &str, field: &str) -> SecMasterResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.hget(key, field).await.map_err(|e| {
            SecMasterError::cache(format!("Failed to read field '{}' of '{}': {}", field, key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for '{}' / '{}'", key, field),
            None => debug!("Cache miss for '{}' / '{}'", key, field),
        }

        Ok(value)
    }

    async fn hash_get_all(&self, key: &str) -> SecMasterResult<HashMap<String, String>> {
        let mut conn = self.get_conn().await?;
        conn.hgetall(key)
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to read hash '{}': {}", key, e)))
    }

    async fn hash_put(&self, key: &str, field: &str, value: &str) -> SecMasterResult<()> {
        let mut conn = self.get_conn().await?;
        conn.hset::<_, _, _, ()>(key, field, value).await.map_err(|e| {
            SecMasterError::cache(format!("Failed to write field '{}' of '{}': {}", field, key, e))
        })
    }

    async fn hash_put_all(&self, key: &str, entries: &HashMap<String, String>) -> SecMasterResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let items: Vec<(&str, &str)> = entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        conn.hset_multiple::<_, _, _, ()>(key, items.as_slice())
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to write hash '{}': {}", key, e)))?;

        debug!("Wrote {} fields to '{}'", items.len(), key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> SecMasterResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn delete_keys(&self, keys: &[String]) -> SecMasterResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(keys.to_vec())
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to delete keys: {}", e)))?;

        debug!("Deleted {} keys", deleted);
        Ok(u64::try_from(deleted).unwrap_or(0))
    }

    async fn keys(&self, pattern: &str) -> SecMasterResult<Vec<String>> {
        let mut conn = self.get_conn().await?;

        // KEYS blocks the server; the security master namespace is small
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut *conn)
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to list keys '{}': {}", pattern, e)))?;

        Ok(keys)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> SecMasterResult<bool> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX);

        let applied: bool = conn
            .expire(key, ttl_secs)
            .await
            .map_err(|e| SecMasterError::cache(format!("Failed to set TTL on '{}': {}", key, e)))?;

        debug!("Set TTL {}s on '{}': {}", ttl_secs, key, applied);
        Ok(applied)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
