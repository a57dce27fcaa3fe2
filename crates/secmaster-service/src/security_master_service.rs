//! Security master service trait definition.

use crate::dto::{ClearSummary, LoadSummary};
use async_trait::async_trait;
use secmaster_core::Interface;

/// Loader and lookup surface of the security master cache.
///
/// Lookups never fail: store errors are logged and surface as `None`. A
/// miss triggers one synchronous reload followed by a single retry.
#[async_trait]
pub trait SecurityMasterService: Interface + Send + Sync {
    /// Populates both cache layers from scratch.
    async fn initialize(&self) -> LoadSummary;

    /// Resolves the physical table for an asset type and customer tier.
    async fn get_table_name(&self, asset_type: &str, tier_id: i32) -> Option<String>;

    /// Resolves a client identifier within a physical table.
    async fn get_client_id_in_table(&self, table_name: &str, match_value: &str) -> Option<String>;

    /// Resolves the table, then the client identifier within it.
    async fn get_client_id(&self, asset_type: &str, tier_id: i32, match_value: &str) -> Option<String>;

    /// Clears and rebuilds both layers.
    async fn refresh_cache(&self) -> LoadSummary;

    /// Deletes the mapping key and every data key.
    async fn clear_all_cache(&self) -> ClearSummary;
}
