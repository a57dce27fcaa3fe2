//! Security master row projection.

use serde::{Deserialize, Serialize};

/// Match-field value and client identifier projected from one security master row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecurityMasterRow {
    /// Value of the configured match field (e.g. an ISIN).
    pub match_field_value: Option<String>,
    /// Client identifier associated with the row.
    pub client_id: Option<String>,
}

impl SecurityMasterRow {
    /// Creates a fully populated row.
    #[must_use]
    pub fn new(match_field_value: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            match_field_value: Some(match_field_value.into()),
            client_id: Some(client_id.into()),
        }
    }

    /// Returns both values when neither is null.
    #[must_use]
    pub fn into_pair(self) -> Option<(String, String)> {
        Some((self.match_field_value?, self.client_id?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_pair() {
        assert_eq!(
            SecurityMasterRow::new("US123", "C001").into_pair(),
            Some(("US123".to_string(), "C001".to_string()))
        );

        let missing_client = SecurityMasterRow {
            match_field_value: Some("US123".to_string()),
            client_id: None,
        };
        assert_eq!(missing_client.into_pair(), None);
        assert_eq!(SecurityMasterRow::default().into_pair(), None);
    }
}
