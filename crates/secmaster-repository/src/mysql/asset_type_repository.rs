//! MySQL asset type configuration repository.

use crate::{traits::AssetTypeRepository, DatabasePoolInterface};
use async_trait::async_trait;
use secmaster_core::{AssetTypeConfig, SecMasterResult};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, warn};

/// MySQL asset type repository reading the `ASSET_TYPE` table.
#[derive(Clone)]
pub struct MySqlAssetTypeRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlAssetTypeRepository {
    /// Creates a new MySQL asset type repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an asset type configuration.
#[derive(Debug, FromRow)]
struct AssetTypeRow {
    id: Option<String>,
    customer_tier_id: Option<String>,
    asset_type: Option<String>,
    system_code: Option<String>,
    buy_list: Option<String>,
    field: Option<String>,
    house_view_list: Option<String>,
}

impl AssetTypeRow {
    /// Converts the row, returning `None` when a key column is null.
    fn into_config(self) -> Option<AssetTypeConfig> {
        Some(AssetTypeConfig {
            id: self.id.unwrap_or_default(),
            customer_tier_id: self.customer_tier_id?,
            asset_type: self.asset_type?,
            system_code: self.system_code?,
            buy_list_enabled: is_flag_set(self.buy_list.as_deref()),
            match_field: self.field,
            house_view_list: self.house_view_list,
        })
    }
}

/// `'Y'` flag columns, as used by `ASSET_TYPE.BUY_LIST` and `TABLE_SWITCH_LOG.IS_VALID`.
pub(crate) fn is_flag_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("Y"))
}

#[async_trait]
impl AssetTypeRepository for MySqlAssetTypeRepository {
    async fn find_buy_list_enabled(&self) -> SecMasterResult<Vec<AssetTypeConfig>> {
        debug!("Finding buy-list enabled asset types");

        let rows = sqlx::query_as::<_, AssetTypeRow>(
            r#"
            SELECT CAST(ID AS CHAR) AS id,
                   CAST(CUSTOMER_TIER_ID AS CHAR) AS customer_tier_id,
                   ASSET_TYPE AS asset_type,
                   SYSTEM_CODE AS system_code,
                   BUY_LIST AS buy_list,
                   FIELD AS field,
                   HOUSE_VIEW_LIST AS house_view_list
            FROM ASSET_TYPE
            WHERE BUY_LIST = 'Y'
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let total = rows.len();
        let configs: Vec<AssetTypeConfig> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                let config = row.into_config();
                if config.is_none() {
                    warn!("Skipping ASSET_TYPE row {:?}: tier, asset type or system code is null", id);
                }
                config
            })
            .collect();

        debug!("Loaded {} of {} asset type rows", configs.len(), total);
        Ok(configs)
    }
}
