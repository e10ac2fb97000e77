//! Tool catalog cache with TTL freshness and stale fallback.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::mcp::schema::ToolDescriptor;

/// A catalog snapshot: the tools in bridge order plus when they were captured.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub tools: Arc<Vec<ToolDescriptor>>,
    pub captured_at: Instant,
}

/// TTL cache for the tool list.
///
/// Freshness and retention are separate: once the TTL elapses `get` returns
/// `None`, but the last catalog stays available through `last_known` until the
/// next successful `set` replaces it.
#[derive(Debug)]
pub struct ToolCache {
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    catalog: Option<Catalog>,
    /// `None` means never set or invalidated.
    fresh_since: Option<Instant>,
}

impl ToolCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the held catalog is still within its TTL. Elapsed == TTL is expired.
    pub fn is_fresh(&self) -> bool {
        let inner = self.lock();
        self.is_fresh_locked(&inner)
    }

    fn is_fresh_locked(&self, inner: &CacheInner) -> bool {
        inner
            .fresh_since
            .map(|since| since.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// The catalog, only while fresh.
    pub fn get(&self) -> Option<Arc<Vec<ToolDescriptor>>> {
        let inner = self.lock();
        if !self.is_fresh_locked(&inner) {
            return None;
        }
        inner.catalog.as_ref().map(|c| Arc::clone(&c.tools))
    }

    /// Replace the catalog and start a new freshness window.
    pub fn set(&self, tools: Vec<ToolDescriptor>) {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.catalog = Some(Catalog {
            tools: Arc::new(tools),
            captured_at: now,
        });
        inner.fresh_since = Some(now);
    }

    /// Mark the catalog stale without discarding it.
    pub fn invalidate(&self) {
        self.lock().fresh_since = None;
    }

    /// The most recently stored catalog, fresh or not.
    pub fn last_known(&self) -> Option<Catalog> {
        self.lock().catalog.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tools(names: &[&str]) -> Vec<ToolDescriptor> {
        names
            .iter()
            .map(|name| ToolDescriptor::from_raw(&json!({ "name": name })).unwrap())
            .collect()
    }

    fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn never_set_is_stale_and_empty() {
        let cache = ToolCache::new(Duration::from_secs(300));
        assert!(cache.get().is_none());
        assert!(cache.last_known().is_none());
        assert!(!cache.is_fresh());
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_until_ttl_boundary() {
        let cache = ToolCache::new(Duration::from_secs(300));
        cache.set(tools(&["a", "b"]));

        tokio::time::advance(Duration::from_secs(299)).await;
        let fresh = cache.get().expect("catalog should be fresh before ttl");
        assert_eq!(names(&fresh), ["a", "b"]);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get().is_none(), "elapsed == ttl counts as expired");

        let stale = cache.last_known().expect("stale catalog is retained");
        assert_eq!(names(&stale.tools), ["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_is_never_fresh() {
        let cache = ToolCache::new(Duration::ZERO);
        cache.set(tools(&["a"]));
        assert!(cache.get().is_none());
        assert!(cache.last_known().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_stale_but_keeps_catalog() {
        let cache = ToolCache::new(Duration::from_secs(300));
        cache.set(tools(&["a"]));
        cache.invalidate();

        assert!(cache.get().is_none());
        assert_eq!(names(&cache.last_known().unwrap().tools), ["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn set_replaces_catalog_and_restarts_window() {
        let cache = ToolCache::new(Duration::from_secs(10));
        cache.set(tools(&["old"]));
        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(cache.get().is_none());

        cache.set(tools(&["new"]));
        assert_eq!(names(&cache.get().unwrap()), ["new"]);
        let snapshot = cache.last_known().unwrap();
        assert_eq!(snapshot.captured_at, Instant::now());
    }
}
