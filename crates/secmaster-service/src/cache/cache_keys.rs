//! Cache key generators for consistent key naming.

/// Default namespace for security master keys.
pub const DEFAULT_PREFIX: &str = "security_master";

/// Key builder for the two cache layers.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    /// Create a new key builder with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Mapping layer key (hash: `{tier}:{asset}` -> physical table).
    #[must_use]
    pub fn mapping(&self) -> String {
        format!("{}:mapping", self.prefix)
    }

    /// Data layer key for one physical table (hash: match value -> client id).
    #[must_use]
    pub fn data(&self, table_name: &str) -> String {
        format!("{}:data:{}", self.prefix, table_name)
    }

    /// Pattern matching every data layer key.
    #[must_use]
    pub fn data_pattern(&self) -> String {
        format!("{}:data:*", self.prefix)
    }

    /// Field name inside the mapping hash.
    #[must_use]
    pub fn mapping_field(customer_tier_id: &str, asset_type: &str) -> String {
        format!("{}:{}", customer_tier_id, asset_type)
    }
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
