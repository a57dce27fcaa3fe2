//! Dependency wiring.
//!
//! Builds every collaborator from configuration and hands the service
//! `Arc<dyn ...>` handles, so no component reaches for a global.

use secmaster_config::{AppConfig, CacheConfig, RedisConfig};
use secmaster_core::{SecMasterError, SecMasterResult};
use secmaster_repository::{
    create_pool, BusinessCalendar, DatabasePoolInterface, FixedBusinessCalendar, MySqlAssetTypeRepository,
    MySqlBusinessCalendar, MySqlSecurityMasterDao, MySqlTableSwitchRepository,
};
use secmaster_service::{
    create_redis_pool, CacheInterface, InMemoryCacheService, RedisCacheService, SecurityMasterDeps,
    SecurityMasterService, SecurityMasterServiceImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Fully wired application components.
pub struct AppModule {
    db_pool: Arc<dyn DatabasePoolInterface>,
    security_master: Arc<dyn SecurityMasterService>,
}

impl AppModule {
    /// Resolves the security master service.
    #[must_use]
    pub fn security_master(&self) -> Arc<dyn SecurityMasterService> {
        self.security_master.clone()
    }

    /// Resolves the database pool.
    #[must_use]
    pub fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.db_pool.clone()
    }
}

/// Builds the application module: MySQL pool, cache store and service.
///
/// Neither backend is contacted for real here; an outage shows up in the
/// first load summary instead.
pub async fn build_app_module(config: &AppConfig) -> SecMasterResult<AppModule> {
    let db_pool = create_pool(&config.database)?;
    let cache = build_cache(&config.redis).await?;
    let security_master = build_security_master(db_pool.clone(), cache, &config.cache)?;

    Ok(AppModule {
        db_pool,
        security_master,
    })
}

/// Builds the cache store. Falls back to the in-process store when Redis is disabled.
pub async fn build_cache(config: &RedisConfig) -> SecMasterResult<Arc<dyn CacheInterface>> {
    if config.enabled {
        let pool = create_redis_pool(config).await?;
        info!("Using Redis cache store");
        Ok(Arc::new(RedisCacheService::new(pool)))
    } else {
        warn!("Redis disabled, using in-process cache store");
        Ok(Arc::new(InMemoryCacheService::new()))
    }
}

/// Chooses the business calendar: a fixed date when overridden, otherwise MySQL.
pub fn build_business_calendar(
    db_pool: Arc<dyn DatabasePoolInterface>,
    config: &CacheConfig,
) -> SecMasterResult<Arc<dyn BusinessCalendar>> {
    let override_date = config
        .business_date_override()
        .map_err(|raw| SecMasterError::Configuration(format!("Invalid business date override '{}'", raw)))?;

    match override_date {
        Some(date) => {
            info!(%date, "Using business date override");
            Ok(Arc::new(FixedBusinessCalendar::new(date)))
        }
        None => Ok(Arc::new(MySqlBusinessCalendar::new(db_pool))),
    }
}

/// Wires the security master service over MySQL-backed collaborators.
pub fn build_security_master(
    db_pool: Arc<dyn DatabasePoolInterface>,
    cache: Arc<dyn CacheInterface>,
    config: &CacheConfig,
) -> SecMasterResult<Arc<dyn SecurityMasterService>> {
    let deps = SecurityMasterDeps {
        asset_types: Arc::new(MySqlAssetTypeRepository::new(db_pool.clone())),
        table_switches: Arc::new(MySqlTableSwitchRepository::new(db_pool.clone())),
        calendar: build_business_calendar(db_pool.clone(), config)?,
        security_master: Arc::new(MySqlSecurityMasterDao::new(db_pool)),
    };

    Ok(Arc::new(SecurityMasterServiceImpl::new(deps, cache, config)))
}
