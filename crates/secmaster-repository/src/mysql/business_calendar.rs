//! MySQL-backed business calendar.

use crate::{traits::BusinessCalendar, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::NaiveDate;
use secmaster_core::{SecMasterError, SecMasterResult};
use std::sync::Arc;
use tracing::debug;

/// Reads the latest business date produced by the batch run.
#[derive(Clone)]
pub struct MySqlBusinessCalendar {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlBusinessCalendar {
    /// Creates a new MySQL business calendar.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessCalendar for MySqlBusinessCalendar {
    async fn current_business_date(&self) -> SecMasterResult<NaiveDate> {
        let date: Option<Option<NaiveDate>> = sqlx::query_scalar(
            r#"
            SELECT DATE(BUSINESS_DATE)
            FROM BATCH_BUSINESS_DATE_RESULT
            ORDER BY BUSINESS_DATE DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.inner())
        .await?;

        let date = date
            .flatten()
            .ok_or_else(|| SecMasterError::not_found("BusinessDate", "latest"))?;

        debug!("Current business date: {}", date);
        Ok(date)
    }
}
