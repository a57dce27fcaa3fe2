//! MySQL table switch log repository.

use super::asset_type_repository::is_flag_set;
use crate::{traits::TableSwitchRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::NaiveDate;
use secmaster_core::{SecMasterResult, TableSwitchEntry};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL repository reading the `TABLE_SWITCH_LOG` table.
#[derive(Clone)]
pub struct MySqlTableSwitchRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlTableSwitchRepository {
    /// Creates a new MySQL table switch repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TableSwitchRow {
    target_table: Option<String>,
    table_suffix: Option<String>,
    business_date: NaiveDate,
    is_valid: Option<String>,
}

impl From<TableSwitchRow> for TableSwitchEntry {
    fn from(row: TableSwitchRow) -> Self {
        Self {
            target_table: row.target_table,
            table_suffix: row.table_suffix,
            business_date: row.business_date,
            is_valid: is_flag_set(row.is_valid.as_deref()),
        }
    }
}

#[async_trait]
impl TableSwitchRepository for MySqlTableSwitchRepository {
    async fn find_valid_by_business_date(&self, business_date: NaiveDate) -> SecMasterResult<Vec<TableSwitchEntry>> {
        debug!("Finding valid table switch entries for {}", business_date);

        let rows = sqlx::query_as::<_, TableSwitchRow>(
            r#"
            SELECT TARGET_TABLE AS target_table,
                   TABLE_SUFFIX AS table_suffix,
                   DATE(BUSINESS_DATE) AS business_date,
                   IS_VALID AS is_valid
            FROM TABLE_SWITCH_LOG
            WHERE IS_VALID = 'Y' AND DATE(BUSINESS_DATE) = ?
            "#,
        )
        .bind(business_date)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(TableSwitchEntry::from).collect())
    }
}
