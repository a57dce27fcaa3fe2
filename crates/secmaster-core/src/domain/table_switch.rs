//! Table switch log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves a logical table name to its currently active, suffixed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSwitchEntry {
    /// Logical table name (e.g. `BR_SECURITY_MASTER_BND`).
    pub target_table: Option<String>,
    /// Suffix of the active physical table (e.g. `20251009`).
    pub table_suffix: Option<String>,
    /// Business date the entry applies to.
    pub business_date: NaiveDate,
    /// Whether the entry is currently valid.
    pub is_valid: bool,
}

impl TableSwitchEntry {
    /// Returns the trimmed logical table name when present and non-blank.
    #[must_use]
    pub fn logical_table_name(&self) -> Option<&str> {
        non_blank(self.target_table.as_deref())
    }

    /// Returns `{target_table}_{table_suffix}`, or `None` when either part is blank.
    #[must_use]
    pub fn physical_table_name(&self) -> Option<String> {
        let target = self.logical_table_name()?;
        let suffix = non_blank(self.table_suffix.as_deref())?;
        Some(format!("{}_{}", target, suffix))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Logical -> physical table name resolution for one business date.
#[derive(Debug, Clone, Default)]
pub struct TableResolution {
    tables: HashMap<String, String>,
}

impl TableResolution {
    /// Builds a resolution map from switch entries.
    ///
    /// Entries with a blank target or suffix are ignored. When several entries
    /// share a logical name, the first one wins.
    #[must_use]
    pub fn from_entries(entries: &[TableSwitchEntry]) -> Self {
        let mut tables = HashMap::with_capacity(entries.len());
        for entry in entries {
            let (Some(logical), Some(physical)) = (entry.logical_table_name(), entry.physical_table_name()) else {
                continue;
            };
            tables.entry(logical.to_string()).or_insert(physical);
        }
        Self { tables }
    }

    /// Resolves a logical table name.
    #[must_use]
    pub fn resolve(&self, logical_table: &str) -> Option<&str> {
        self.tables.get(logical_table).map(String::as_str)
    }

    /// Number of resolvable logical tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` when nothing resolves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
