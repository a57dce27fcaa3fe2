//! Business calendar that always answers with a configured date.

use crate::traits::BusinessCalendar;
use async_trait::async_trait;
use chrono::NaiveDate;
use secmaster_core::SecMasterResult;

/// Business calendar pinned to one date, used when the date is overridden in configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedBusinessCalendar {
    date: NaiveDate,
}

impl FixedBusinessCalendar {
    /// Creates a calendar that always returns `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

#[async_trait]
impl BusinessCalendar for FixedBusinessCalendar {
    async fn current_business_date(&self) -> SecMasterResult<NaiveDate> {
        Ok(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 9).unwrap();
        let calendar = FixedBusinessCalendar::new(date);
        assert_eq!(calendar.current_business_date().await.unwrap(), date);
    }
}
