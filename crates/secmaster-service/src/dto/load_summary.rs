//! Load cycle reporting DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

/// What started a load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadTrigger {
    /// Initial population at process start.
    Startup,
    /// Operator-requested refresh.
    Manual,
    /// A lookup missed and requested a rebuild.
    CacheMiss,
}

impl std::fmt::Display for ReloadTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Startup => write!(f, "startup"),
            Self::Manual => write!(f, "manual"),
            Self::CacheMiss => write!(f, "cache_miss"),
        }
    }
}

/// Overall result of a load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Every configuration row was processed.
    Completed,
    /// No valid switch entries exist for the business date; the cache is empty.
    NoSwitchEntries,
    /// No enabled configuration rows exist; the cache is empty.
    NoConfigurations,
    /// The cycle aborted before finishing.
    Failed { reason: String },
}

impl LoadStatus {
    /// Returns `true` unless the cycle aborted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Result of processing one configuration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Data layer written with `records` entries.
    Loaded { table_name: String, records: usize },
    /// The physical table yielded no usable rows.
    Empty { table_name: String },
    /// Mapping recorded, data load skipped for lack of a match field.
    MissingMatchField { table_name: String },
    /// No switch entry resolves the logical table; the row has no mapping.
    Unresolved { logical_table: String },
    /// The row's data load failed.
    Failed { table_name: Option<String>, reason: String },
}

/// Per-row report, identified by the configuration row's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub config_id: String,
    pub customer_tier_id: String,
    pub asset_type: String,
    pub system_code: String,
    pub outcome: RowOutcome,
}

/// Summary of one load cycle.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub trigger: ReloadTrigger,
    pub business_date: Option<NaiveDate>,
    pub status: LoadStatus,
    pub rows: Vec<RowReport>,
    /// Entries written to the mapping layer.
    pub mappings_written: usize,
    pub elapsed: Duration,
}

impl LoadSummary {
    /// Creates an empty summary for a cycle in progress.
    #[must_use]
    pub fn new(trigger: ReloadTrigger) -> Self {
        Self {
            trigger,
            business_date: None,
            status: LoadStatus::Completed,
            rows: Vec::new(),
            mappings_written: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Number of data tables written.
    #[must_use]
    pub fn tables_loaded(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Loaded { .. }))
            .count()
    }

    /// Total data layer entries written.
    #[must_use]
    pub fn records_cached(&self) -> usize {
        self.rows
            .iter()
            .map(|r| match r.outcome {
                RowOutcome::Loaded { records, .. } => records,
                _ => 0,
            })
            .sum()
    }

    /// Number of rows whose data load failed.
    #[must_use]
    pub fn rows_failed(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Failed { .. }))
            .count()
    }

    /// Finds the report for a `(tier, asset type)` pair.
    #[must_use]
    pub fn row(&self, customer_tier_id: &str, asset_type: &str) -> Option<&RowReport> {
        self.rows
            .iter()
            .find(|r| r.customer_tier_id == customer_tier_id && r.asset_type == asset_type)
    }
}

/// Result of clearing both cache layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClearSummary {
    /// Whether the mapping key existed.
    pub mapping_deleted: bool,
    /// Number of data layer keys removed.
    pub data_keys_deleted: u64,
    /// Store errors encountered; clearing continues past them.
    pub errors: Vec<String>,
}

impl ClearSummary {
    /// Returns `true` when no store error occurred.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
