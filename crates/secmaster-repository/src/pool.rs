//! Database connection pool management.

use async_trait::async_trait;
use secmaster_config::DatabaseConfig;
use secmaster_core::{Interface, SecMasterError, SecMasterResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::sync::Arc;
use tracing::info;

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying MySQL pool.
    fn inner(&self) -> &MySqlPool;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// Connections open on first use, so an unreachable database surfaces as
    /// a failed query rather than a startup error. Must run inside a Tokio runtime.
    pub fn connect_lazy(config: &DatabaseConfig) -> SecMasterResult<Self> {
        let options: MySqlConnectOptions = config
            .url
            .parse()
            .map_err(|e| SecMasterError::Configuration(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect_lazy_with(options);

        info!("MySQL connection pool created");
        Ok(Self { pool })
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub fn create_pool(config: &DatabaseConfig) -> SecMasterResult<Arc<dyn DatabasePoolInterface>> {
    let pool = DatabasePool::connect_lazy(config)?;
    Ok(Arc::new(pool))
}
