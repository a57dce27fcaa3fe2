//! Collaborator trait definitions.

use chrono::NaiveDate;
use secmaster_core::{AssetTypeConfig, Interface, SecMasterResult, SecurityMasterRow, TableSwitchEntry};
use async_trait::async_trait;

/// Source of asset type configuration rows.
#[async_trait]
pub trait AssetTypeRepository: Interface + Send + Sync {
    /// Lists every row with the buy list flag enabled.
    async fn find_buy_list_enabled(&self) -> SecMasterResult<Vec<AssetTypeConfig>>;
}

/// Source of table switch log entries.
#[async_trait]
pub trait TableSwitchRepository: Interface + Send + Sync {
    /// Lists valid entries for the given business date.
    async fn find_valid_by_business_date(&self, business_date: NaiveDate) -> SecMasterResult<Vec<TableSwitchEntry>>;
}

/// Business calendar.
#[async_trait]
pub trait BusinessCalendar: Interface + Send + Sync {
    /// Returns the current logical processing date.
    async fn current_business_date(&self) -> SecMasterResult<NaiveDate>;
}

/// Tabular security master data source.
#[async_trait]
pub trait SecurityMasterDao: Interface + Send + Sync {
    /// Reads every row of `table_name`, projecting `match_field` and the client identifier.
    async fn select_match_rows(&self, table_name: &str, match_field: &str) -> SecMasterResult<Vec<SecurityMasterRow>>;
}
