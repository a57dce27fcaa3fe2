//! Common test infrastructure for security master cache tests.
//!
//! In-memory fakes for every collaborator, plus a cache store that fails
//! every call.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use secmaster_config::CacheConfig;
use secmaster_core::{AssetTypeConfig, SecMasterError, SecMasterResult, SecurityMasterRow, TableSwitchEntry};
use secmaster_repository::{
    security_master_query, AssetTypeRepository, BusinessCalendar, SecurityMasterDao, TableSwitchRepository,
};
use secmaster_service::{CacheInterface, InMemoryCacheService, SecurityMasterDeps, SecurityMasterServiceImpl};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BND_TABLE: &str = "BR_SECURITY_MASTER_BND_20251009";

pub fn business_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 9).unwrap()
}

pub fn asset_config(tier: &str, asset_type: &str, system_code: &str, match_field: Option<&str>) -> AssetTypeConfig {
    AssetTypeConfig {
        id: format!("{}-{}", tier, asset_type),
        customer_tier_id: tier.to_string(),
        asset_type: asset_type.to_string(),
        system_code: system_code.to_string(),
        buy_list_enabled: true,
        match_field: match_field.map(ToString::to_string),
        house_view_list: None,
    }
}

pub fn switch_entry(target_table: &str, suffix: &str) -> TableSwitchEntry {
    TableSwitchEntry {
        target_table: Some(target_table.to_string()),
        table_suffix: Some(suffix.to_string()),
        business_date: business_date(),
        is_valid: true,
    }
}

/// Fake asset type configuration source.
pub struct FakeAssetTypes {
    configs: Mutex<Vec<AssetTypeConfig>>,
}

impl FakeAssetTypes {
    pub fn new(configs: Vec<AssetTypeConfig>) -> Self {
        Self {
            configs: Mutex::new(configs),
        }
    }
}

#[async_trait]
impl AssetTypeRepository for FakeAssetTypes {
    async fn find_buy_list_enabled(&self) -> SecMasterResult<Vec<AssetTypeConfig>> {
        Ok(self
            .configs
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.buy_list_enabled)
            .cloned()
            .collect())
    }
}

/// Fake table switch log.
pub struct FakeTableSwitches {
    entries: Mutex<Vec<TableSwitchEntry>>,
}

impl FakeTableSwitches {
    pub fn new(entries: Vec<TableSwitchEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn replace(&self, entries: Vec<TableSwitchEntry>) {
        *self.entries.lock().unwrap() = entries;
    }
}

#[async_trait]
impl TableSwitchRepository for FakeTableSwitches {
    async fn find_valid_by_business_date(&self, date: NaiveDate) -> SecMasterResult<Vec<TableSwitchEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_valid && e.business_date == date)
            .cloned()
            .collect())
    }
}

/// Business calendar that counts calls; one call per load cycle.
///
/// Yields once per call so concurrent lookups can interleave with a load.
pub struct CountingCalendar {
    date: NaiveDate,
    calls: AtomicUsize,
}

impl CountingCalendar {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BusinessCalendar for CountingCalendar {
    async fn current_business_date(&self) -> SecMasterResult<NaiveDate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(self.date)
    }
}

/// Fake tabular source. Unknown tables fail like a missing MySQL table.
#[derive(Default)]
pub struct FakeSecurityMasterDao {
    tables: Mutex<HashMap<String, Vec<SecurityMasterRow>>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl FakeSecurityMasterDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, table_name: &str, rows: Vec<SecurityMasterRow>) -> Self {
        self.tables.lock().unwrap().insert(table_name.to_string(), rows);
        self
    }

    pub fn with_delay(self, table_name: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(table_name.to_string(), delay);
        self
    }
}

#[async_trait]
impl SecurityMasterDao for FakeSecurityMasterDao {
    async fn select_match_rows(&self, table_name: &str, match_field: &str) -> SecMasterResult<Vec<SecurityMasterRow>> {
        security_master_query(table_name, match_field)?;

        let delay = self.delays.lock().unwrap().get(table_name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let rows = self.tables.lock().unwrap().get(table_name).cloned();
        rows.ok_or_else(|| SecMasterError::Database(format!("Table '{}' doesn't exist", table_name)))
    }
}

/// Cache store whose every call fails.
pub struct FailingCache;

fn unavailable<T>() -> SecMasterResult<T> {
    Err(SecMasterError::cache("connection refused"))
}

#[async_trait]
impl CacheInterface for FailingCache {
    async fn hash_get(&self, _key: &str, _field: &str) -> SecMasterResult<Option<String>> {
        unavailable()
    }

    async fn hash_get_all(&self, _key: &str) -> SecMasterResult<HashMap<String, String>> {
        unavailable()
    }

    async fn hash_put(&self, _key: &str, _field: &str, _value: &str) -> SecMasterResult<()> {
        unavailable()
    }

    async fn hash_put_all(&self, _key: &str, _entries: &HashMap<String, String>) -> SecMasterResult<()> {
        unavailable()
    }

    async fn delete(&self, _key: &str) -> SecMasterResult<bool> {
        unavailable()
    }

    async fn delete_keys(&self, _keys: &[String]) -> SecMasterResult<u64> {
        unavailable()
    }

    async fn keys(&self, _pattern: &str) -> SecMasterResult<Vec<String>> {
        unavailable()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> SecMasterResult<bool> {
        unavailable()
    }
}

/// Service wired to fakes and an in-memory store.
pub struct TestHarness {
    pub service: SecurityMasterServiceImpl,
    pub cache: Arc<InMemoryCacheService>,
    pub calendar: Arc<CountingCalendar>,
    pub switches: Arc<FakeTableSwitches>,
}

impl TestHarness {
    pub fn new(
        configs: Vec<AssetTypeConfig>,
        entries: Vec<TableSwitchEntry>,
        dao: FakeSecurityMasterDao,
    ) -> Self {
        Self::with_config(configs, entries, dao, CacheConfig::default())
    }

    pub fn with_config(
        configs: Vec<AssetTypeConfig>,
        entries: Vec<TableSwitchEntry>,
        dao: FakeSecurityMasterDao,
        config: CacheConfig,
    ) -> Self {
        let cache = Arc::new(InMemoryCacheService::new());
        let calendar = Arc::new(CountingCalendar::new(business_date()));
        let switches = Arc::new(FakeTableSwitches::new(entries));

        let deps = SecurityMasterDeps {
            asset_types: Arc::new(FakeAssetTypes::new(configs)),
            table_switches: switches.clone(),
            calendar: calendar.clone(),
            security_master: Arc::new(dao),
        };
        let service = SecurityMasterServiceImpl::new(deps, cache.clone(), &config);

        Self {
            service,
            cache,
            calendar,
            switches,
        }
    }

    /// The single-row BND setup: tier 1 bonds keyed by ISIN.
    pub fn bond_scenario() -> Self {
        Self::new(
            vec![asset_config("1", "BND", "BND", Some("ISIN"))],
            vec![switch_entry("BR_SECURITY_MASTER_BND", "20251009")],
            FakeSecurityMasterDao::new().with_table(
                BND_TABLE,
                vec![SecurityMasterRow::new("US123", "C001"), SecurityMasterRow::new("US456", "C002")],
            ),
        )
    }
}

/// Builds a service over an arbitrary cache store.
pub fn service_with_cache(
    configs: Vec<AssetTypeConfig>,
    entries: Vec<TableSwitchEntry>,
    dao: FakeSecurityMasterDao,
    cache: Arc<dyn CacheInterface>,
) -> (SecurityMasterServiceImpl, Arc<CountingCalendar>) {
    let calendar = Arc::new(CountingCalendar::new(business_date()));
    let deps = SecurityMasterDeps {
        asset_types: Arc::new(FakeAssetTypes::new(configs)),
        table_switches: Arc::new(FakeTableSwitches::new(entries)),
        calendar: calendar.clone(),
        security_master: Arc::new(dao),
    };
    let service = SecurityMasterServiceImpl::new(deps, cache, &CacheConfig::default());
    (service, calendar)
}
