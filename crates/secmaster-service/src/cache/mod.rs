//! Caching infrastructure for the service layer.
//!
//! The service talks to a hash-structured key-value store through
//! [`CacheInterface`]. Redis is the production backend; the in-memory store
//! backs tests and deployments with Redis disabled.

mod cache_interface;
mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::CacheKeys;
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{create_redis_pool, RedisCacheService};
