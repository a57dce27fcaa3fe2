//! Security master service implementation.

use crate::cache::{CacheExt, CacheInterface, CacheKeys};
use crate::dto::{ClearSummary, LoadStatus, LoadSummary, ReloadTrigger, RowOutcome, RowReport};
use crate::security_master_service::SecurityMasterService;
use async_trait::async_trait;
use secmaster_config::CacheConfig;
use secmaster_core::{with_timeout, AssetTypeConfig, SecMasterResult, SecurityMasterRow, TableResolution};
use secmaster_repository::{AssetTypeRepository, BusinessCalendar, SecurityMasterDao, TableSwitchRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Data sources consulted during a load cycle.
#[derive(Clone)]
pub struct SecurityMasterDeps {
    pub asset_types: Arc<dyn AssetTypeRepository>,
    pub table_switches: Arc<dyn TableSwitchRepository>,
    pub calendar: Arc<dyn BusinessCalendar>,
    pub security_master: Arc<dyn SecurityMasterDao>,
}

/// Two-layer security master cache backed by a [`CacheInterface`] store.
///
/// Load cycles are serialized behind `reload_lock`. Each completed cycle
/// bumps `generation`, which lets a lookup that missed detect that somebody
/// else already reloaded while it was waiting for the lock.
pub struct SecurityMasterServiceImpl {
    deps: SecurityMasterDeps,
    cache: Arc<dyn CacheInterface>,
    keys: CacheKeys,
    ttl: Duration,
    query_timeout: Duration,
    store_timeout: Duration,
    coalesce_reloads: bool,
    reload_lock: Mutex<()>,
    generation: AtomicU64,
}

impl SecurityMasterServiceImpl {
    /// Creates a new service. The cache is empty until [`SecurityMasterService::initialize`] runs.
    pub fn new(deps: SecurityMasterDeps, cache: Arc<dyn CacheInterface>, config: &CacheConfig) -> Self {
        Self {
            deps,
            cache,
            keys: CacheKeys::new(config.key_prefix.clone()),
            ttl: config.ttl(),
            query_timeout: config.query_timeout(),
            store_timeout: config.store_timeout(),
            coalesce_reloads: config.coalesce_reloads,
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of load cycles completed so far.
    #[must_use]
    pub fn load_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the key builder in use.
    #[must_use]
    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    /// Runs a full clear-and-populate cycle. Callers must hold `reload_lock`.
    async fn run_load_cycle(&self, trigger: ReloadTrigger) -> LoadSummary {
        let started = Instant::now();
        info!(%trigger, "Security master cache load started");

        let cleared = self.clear_layers().await;
        if !cleared.is_clean() {
            warn!(errors = ?cleared.errors, "Cache clear incomplete, loading anyway");
        }

        let mut summary = LoadSummary::new(trigger);
        summary.status = match self.populate(&mut summary).await {
            Ok(status) => status,
            Err(e) => {
                error!(%trigger, error = %e, retriable = e.is_retriable(), "Security master cache load failed");
                LoadStatus::Failed { reason: e.to_string() }
            }
        };
        summary.elapsed = started.elapsed();
        self.generation.fetch_add(1, Ordering::AcqRel);

        info!(
            %trigger,
            status = ?summary.status,
            tables_loaded = summary.tables_loaded(),
            records_cached = summary.records_cached(),
            rows_failed = summary.rows_failed(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Security master cache load finished"
        );
        summary
    }

    async fn populate(&self, summary: &mut LoadSummary) -> SecMasterResult<LoadStatus> {
        let business_date = with_timeout(
            self.query_timeout,
            "business date query",
            self.deps.calendar.current_business_date(),
        )
        .await?;
        summary.business_date = Some(business_date);
        debug!(%business_date, "Resolved business date");

        let entries = with_timeout(
            self.query_timeout,
            "table switch query",
            self.deps.table_switches.find_valid_by_business_date(business_date),
        )
        .await?;
        let resolution = TableResolution::from_entries(&entries);
        if resolution.is_empty() {
            warn!(%business_date, "No valid table switch entries, cache left empty");
            return Ok(LoadStatus::NoSwitchEntries);
        }
        debug!(tables = resolution.len(), "Resolved table switch entries");

        let configs = with_timeout(
            self.query_timeout,
            "asset type query",
            self.deps.asset_types.find_buy_list_enabled(),
        )
        .await?;
        if configs.is_empty() {
            info!("No buy list enabled asset types, cache left empty");
            return Ok(LoadStatus::NoConfigurations);
        }

        let mut mapping = HashMap::with_capacity(configs.len());
        for config in &configs {
            let outcome = self.load_row(config, &resolution, &mut mapping).await;
            summary.rows.push(RowReport {
                config_id: config.id.clone(),
                customer_tier_id: config.customer_tier_id.clone(),
                asset_type: config.asset_type.clone(),
                system_code: config.system_code.clone(),
                outcome,
            });
        }

        if !mapping.is_empty() {
            let key = self.keys.mapping();
            with_timeout(
                self.store_timeout,
                "mapping write",
                self.cache.put_hash_with_ttl(&key, &mapping, self.ttl),
            )
            .await?;
            summary.mappings_written = mapping.len();
        }

        Ok(LoadStatus::Completed)
    }

    /// Resolves one configuration row, records its mapping, and loads its data layer.
    async fn load_row(
        &self,
        config: &AssetTypeConfig,
        resolution: &TableResolution,
        mapping: &mut HashMap<String, String>,
    ) -> RowOutcome {
        let logical_table = config.security_master_table_name();
        let Some(table_name) = resolution.resolve(&logical_table).map(ToString::to_string) else {
            warn!(
                config_id = %config.id,
                tier = %config.customer_tier_id,
                asset_type = %config.asset_type,
                logical_table = %logical_table,
                "No table switch entry for logical table, row skipped"
            );
            return RowOutcome::Unresolved { logical_table };
        };

        mapping.insert(
            CacheKeys::mapping_field(&config.customer_tier_id, &config.asset_type),
            table_name.clone(),
        );

        let Some(match_field) = config.match_field() else {
            warn!(
                config_id = %config.id,
                tier = %config.customer_tier_id,
                asset_type = %config.asset_type,
                table = %table_name,
                "Match field is blank, data load skipped"
            );
            return RowOutcome::MissingMatchField { table_name };
        };

        match self.load_table(&table_name, match_field).await {
            Ok(0) => {
                warn!(table = %table_name, match_field, "Security master table yielded no rows");
                RowOutcome::Empty { table_name }
            }
            Ok(records) => {
                debug!(table = %table_name, records, "Loaded security master table");
                RowOutcome::Loaded { table_name, records }
            }
            Err(e) => {
                error!(
                    config_id = %config.id,
                    tier = %config.customer_tier_id,
                    asset_type = %config.asset_type,
                    system_code = %config.system_code,
                    table = %table_name,
                    error = %e,
                    "Failed to load security master table"
                );
                RowOutcome::Failed {
                    table_name: Some(table_name),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Loads one physical table into its data key. Returns the number of entries written.
    async fn load_table(&self, table_name: &str, match_field: &str) -> SecMasterResult<usize> {
        let rows = with_timeout(
            self.query_timeout,
            "security master query",
            self.deps.security_master.select_match_rows(table_name, match_field),
        )
        .await?;

        let data: HashMap<String, String> = rows.into_iter().filter_map(SecurityMasterRow::into_pair).collect();
        if data.is_empty() {
            return Ok(0);
        }

        let key = self.keys.data(table_name);
        with_timeout(
            self.store_timeout,
            "data write",
            self.cache.put_hash_with_ttl(&key, &data, self.ttl),
        )
        .await?;
        Ok(data.len())
    }

    /// Deletes the mapping key and every data key, collecting failures.
    async fn clear_layers(&self) -> ClearSummary {
        let mut summary = ClearSummary::default();

        let mapping_key = self.keys.mapping();
        match with_timeout(self.store_timeout, "mapping delete", self.cache.delete(&mapping_key)).await {
            Ok(deleted) => summary.mapping_deleted = deleted,
            Err(e) => summary.errors.push(format!("{}: {}", mapping_key, e)),
        }

        let pattern = self.keys.data_pattern();
        match with_timeout(self.store_timeout, "data delete", self.cache.delete_pattern(&pattern)).await {
            Ok(deleted) => summary.data_keys_deleted = deleted,
            Err(e) => summary.errors.push(format!("{}: {}", pattern, e)),
        }

        summary
    }

    async fn read_field(&self, key: &str, field: &str) -> Option<String> {
        match with_timeout(self.store_timeout, "cache read", self.cache.hash_get(key, field)).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, field, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Reads a field, reloading once and retrying on a miss.
    async fn lookup(&self, key: &str, field: &str) -> Option<String> {
        let observed = self.load_generation();
        if let Some(value) = self.read_field(key, field).await {
            debug!(key, field, "Cache hit");
            return Some(value);
        }

        debug!(key, field, "Cache miss, reloading");
        self.reload_after_miss(observed).await;
        self.read_field(key, field).await
    }

    async fn reload_after_miss(&self, observed: u64) {
        let _guard = self.reload_lock.lock().await;
        if self.coalesce_reloads && self.load_generation() != observed {
            debug!("Reload completed while waiting, skipping");
            return;
        }
        self.run_load_cycle(ReloadTrigger::CacheMiss).await;
    }
}

#[async_trait]
impl SecurityMasterService for SecurityMasterServiceImpl {
    async fn initialize(&self) -> LoadSummary {
        let _guard = self.reload_lock.lock().await;
        self.run_load_cycle(ReloadTrigger::Startup).await
    }

    async fn get_table_name(&self, asset_type: &str, tier_id: i32) -> Option<String> {
        let field = CacheKeys::mapping_field(&tier_id.to_string(), asset_type);
        self.lookup(&self.keys.mapping(), &field).await
    }

    async fn get_client_id_in_table(&self, table_name: &str, match_value: &str) -> Option<String> {
        self.lookup(&self.keys.data(table_name), match_value).await
    }

    async fn get_client_id(&self, asset_type: &str, tier_id: i32, match_value: &str) -> Option<String> {
        let table_name = self.get_table_name(asset_type, tier_id).await?;
        self.get_client_id_in_table(&table_name, match_value).await
    }

    async fn refresh_cache(&self) -> LoadSummary {
        let _guard = self.reload_lock.lock().await;
        self.run_load_cycle(ReloadTrigger::Manual).await
    }

    async fn clear_all_cache(&self) -> ClearSummary {
        let _guard = self.reload_lock.lock().await;
        let summary = self.clear_layers().await;
        info!(
            mapping_deleted = summary.mapping_deleted,
            data_keys_deleted = summary.data_keys_deleted,
            errors = summary.errors.len(),
            "Security master cache cleared"
        );
        summary
    }
}

impl std::fmt::Debug for SecurityMasterServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityMasterServiceImpl")
            .field("keys", &self.keys)
            .field("ttl", &self.ttl)
            .field("coalesce_reloads", &self.coalesce_reloads)
            .field("generation", &self.load_generation())
            .finish_non_exhaustive()
    }
}
