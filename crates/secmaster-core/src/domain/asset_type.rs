//! Asset type configuration rows.

use crate::validation::rules;
use serde::{Deserialize, Serialize};

/// Prefix shared by every logical security master table.
pub const SECURITY_MASTER_TABLE_PREFIX: &str = "BR_SECURITY_MASTER_";

/// One row of asset type configuration.
///
/// Each enabled row maps a `(customer tier, asset type)` pair onto a
/// security master table and names the column used as the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeConfig {
    /// Row identifier.
    pub id: String,
    /// Tenant / customer segment discriminator.
    pub customer_tier_id: String,
    /// Asset category code (e.g. `BND`).
    pub asset_type: String,
    /// Identifies the physical data source family.
    pub system_code: String,
    /// Only rows with this flag set participate in loading.
    pub buy_list_enabled: bool,
    /// Column used as the lookup key within the resolved table.
    pub match_field: Option<String>,
    /// House view list code. Carried through, not used by the cache.
    pub house_view_list: Option<String>,
}

impl AssetTypeConfig {
    /// Returns the logical security master table name, before suffix resolution.
    #[must_use]
    pub fn security_master_table_name(&self) -> String {
        format!("{}{}", SECURITY_MASTER_TABLE_PREFIX, self.system_code)
    }

    /// Returns the trimmed match field, or `None` when it is blank.
    #[must_use]
    pub fn match_field(&self) -> Option<&str> {
        if rules::is_blank(self.match_field.as_deref()) {
            return None;
        }
        self.match_field.as_deref().map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(match_field: Option<&str>) -> AssetTypeConfig {
        AssetTypeConfig {
            id: "1".to_string(),
            customer_tier_id: "1".to_string(),
            asset_type: "BND".to_string(),
            system_code: "BND".to_string(),
            buy_list_enabled: true,
            match_field: match_field.map(ToString::to_string),
            house_view_list: None,
        }
    }

    #[test]
    fn test_security_master_table_name() {
        assert_eq!(config(None).security_master_table_name(), "BR_SECURITY_MASTER_BND");
    }

    #[test]
    fn test_match_field_trimmed() {
        assert_eq!(config(Some(" ISIN ")).match_field(), Some("ISIN"));
    }

    #[test]
    fn test_blank_match_field() {
        assert_eq!(config(None).match_field(), None);
        assert_eq!(config(Some("")).match_field(), None);
        assert_eq!(config(Some("  ")).match_field(), None);
    }
}
