//! In-process cache implementation with passive TTL expiry.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use secmaster_core::SecMasterResult;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct HashEntry {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl HashEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory hash cache.
///
/// Expired keys are dropped lazily when they are next touched, the same
/// observable behaviour as Redis passive expiry.
#[derive(Debug, Default)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, HashEntry>>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| !e.is_expired(now)).count()
    }

    /// Returns `true` when no live key exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_if_expired(&self, key: &str) {
        let now = Instant::now();
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn hash_get(&self, key: &str, field: &str) -> SecMasterResult<Option<String>> {
        self.purge_if_expired(key);
        Ok(self
            .entries
            .read()
            .get(key)
            .and_then(|e| e.fields.get(field).cloned()))
    }

    async fn hash_get_all(&self, key: &str) -> SecMasterResult<HashMap<String, String>> {
        self.purge_if_expired(key);
        Ok(self
            .entries
            .read()
            .get(key)
            .map(|e| e.fields.clone())
            .unwrap_or_default())
    }

    async fn hash_put(&self, key: &str, field: &str, value: &str) -> SecMasterResult<()> {
        self.purge_if_expired(key);
        self.entries
            .write()
            .entry(key.to_string())
            .or_default()
            .fields
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_put_all(&self, key: &str, entries: &HashMap<String, String>) -> SecMasterResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.purge_if_expired(key);
        let mut guard = self.entries.write();
        let entry = guard.entry(key.to_string()).or_default();
        entry
            .fields
            .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn delete(&self, key: &str) -> SecMasterResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .remove(key)
            .is_some_and(|e| !e.is_expired(now)))
    }

    async fn delete_keys(&self, keys: &[String]) -> SecMasterResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let deleted = keys
            .iter()
            .filter_map(|k| entries.remove(k))
            .filter(|e| !e.is_expired(now))
            .count();
        Ok(deleted as u64)
    }

    async fn keys(&self, pattern: &str) -> SecMasterResult<Vec<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        entries.retain(|_, e| !e.is_expired(now));
        Ok(entries
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> SecMasterResult<bool> {
        self.purge_if_expired(key);
        match self.entries.write().get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Glob matching with `*` (any run) and `?` (any single character).
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            resume = t;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            resume += 1;
            t = resume;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("security_master:data:*", "security_master:data:BR_X_1"));
        assert!(glob_match("security_master:data:*", "security_master:data:"));
        assert!(!glob_match("security_master:data:*", "security_master:mapping"));
        assert!(glob_match("a?c", "abc"));
        assert!(!glob_match("a?c", "ac"));
        assert!(glob_match("*:data:*", "x:data:y"));
        assert!(glob_match("exact", "exact"));
        assert!(!glob_match("exact", "exactly"));
    }

    #[tokio::test]
    async fn test_hash_put_and_get() {
        let cache = InMemoryCacheService::new();
        cache.hash_put("k", "f", "v").await.unwrap();

        assert_eq!(cache.hash_get("k", "f").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.hash_get("k", "other").await.unwrap(), None);
        assert_eq!(cache.hash_get("missing", "f").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_all_merges_fields() {
        let cache = InMemoryCacheService::new();
        cache.hash_put("k", "a", "1").await.unwrap();

        let batch = HashMap::from([("b".to_string(), "2".to_string()), ("a".to_string(), "3".to_string())]);
        cache.hash_put_all("k", &batch).await.unwrap();

        let all = cache.hash_get_all("k").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a"], "3");
        assert_eq!(all["b"], "2");
    }

    #[tokio::test]
    async fn test_delete_and_keys() {
        let cache = InMemoryCacheService::new();
        cache.hash_put("p:mapping", "f", "v").await.unwrap();
        cache.hash_put("p:data:A", "f", "v").await.unwrap();
        cache.hash_put("p:data:B", "f", "v").await.unwrap();

        let mut keys = cache.keys("p:data:*").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["p:data:A".to_string(), "p:data:B".to_string()]);

        assert_eq!(cache.delete_keys(&keys).await.unwrap(), 2);
        assert!(cache.delete("p:mapping").await.unwrap());
        assert!(!cache.delete("p:mapping").await.unwrap());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_passive_expiry() {
        let cache = InMemoryCacheService::new();
        cache.hash_put("k", "f", "v").await.unwrap();
        assert!(cache.expire("k", Duration::from_secs(3600)).await.unwrap());
        assert!(!cache.expire("missing", Duration::from_secs(3600)).await.unwrap());

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(cache.hash_get("k", "f").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.hash_get("k", "f").await.unwrap(), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_key_not_listed_or_counted() {
        let cache = InMemoryCacheService::new();
        cache.hash_put("p:data:A", "f", "v").await.unwrap();
        cache.expire("p:data:A", Duration::from_secs(1)).await.unwrap();

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(cache.keys("p:data:*").await.unwrap().is_empty());
        assert!(!cache.delete("p:data:A").await.unwrap());
    }
}
