use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use crate::models::CacheStats;
use crate::services::upstream::UpstreamError;

/// Shared list of raw opportunity records
pub type OpportunityList = Arc<Vec<Value>>;

/// In-memory cache for the provider's opportunity list
///
/// Concurrent misses on the same key share a single upstream fetch. A TTL
/// of zero disables caching and every call goes upstream.
pub struct OpportunityCache {
    inner: Option<moka::future::Cache<String, OpportunityList>>,
}

impl OpportunityCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        if ttl_secs == 0 || max_entries == 0 {
            return Self::disabled();
        }

        let inner = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner: Some(inner) }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Return the cached list or run `fetch` to fill it
    ///
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<OpportunityList, Arc<UpstreamError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Value>, UpstreamError>>,
    {
        match &self.inner {
            Some(cache) => {
                cache
                    .try_get_with(key.to_string(), async move { fetch().await.map(Arc::new) })
                    .await
            }
            None => fetch().await.map(Arc::new).map_err(Arc::new),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.is_enabled(),
            entries: self.inner.as_ref().map(|c| c.entry_count()).unwrap_or(0),
        }
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for the full provider opportunity list
    pub fn opportunities() -> String {
        "opportunities:all".to_string()
    }
}
