//! MySQL security master data access.

use crate::{traits::SecurityMasterDao, DatabasePoolInterface};
use async_trait::async_trait;
use secmaster_core::{validate_sql_identifier, SecMasterResult, SecurityMasterRow};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Column holding the client identifier in every security master table.
pub const CLIENT_ID_COLUMN: &str = "CLIENT_ID";

/// Reads `(match field, CLIENT_ID)` projections from suffixed security master tables.
#[derive(Clone)]
pub struct MySqlSecurityMasterDao {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlSecurityMasterDao {
    /// Creates a new MySQL security master DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SecurityMasterProjection {
    match_field_value: Option<String>,
    client_id: Option<String>,
}

/// Builds the projection query.
///
/// Table and column names cannot be bound as parameters, so both are
/// validated as plain identifiers before being quoted into the statement.
pub fn security_master_query(table_name: &str, match_field: &str) -> SecMasterResult<String> {
    validate_sql_identifier("table", table_name)?;
    validate_sql_identifier("match field", match_field)?;

    Ok(format!(
        "SELECT CAST(`{field}` AS CHAR) AS match_field_value, CAST(`{client}` AS CHAR) AS client_id FROM `{table}`",
        field = match_field,
        client = CLIENT_ID_COLUMN,
        table = table_name,
    ))
}

#[async_trait]
impl SecurityMasterDao for MySqlSecurityMasterDao {
    async fn select_match_rows(&self, table_name: &str, match_field: &str) -> SecMasterResult<Vec<SecurityMasterRow>> {
        let sql = security_master_query(table_name, match_field)?;
        debug!("Querying {} by {}", table_name, match_field);

        let rows = sqlx::query_as::<_, SecurityMasterProjection>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SecurityMasterRow {
                match_field_value: row.match_field_value,
                client_id: row.client_id,
            })
            .collect())
    }
}
