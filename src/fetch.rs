//! Document fetching with a read-through cache in front.

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheConfig, ExpiringCache};
use crate::error::Result;

/// Supplies parsed documents (HTML trees, API payloads) by identifier.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    type Document: Clone + Send + Sync;

    async fn fetch(&self, identifier: &str) -> Result<Self::Document>;
}

/// Caching decorator for a [`DocumentFetcher`].
///
/// Holds a single slot. The slot remembers which identifier filled it, so a
/// request for a different identifier is a miss and replaces the slot rather
/// than returning the other document.
///
/// Concurrent misses are not coalesced; each one calls the backend.
pub struct CachedFetcher<F: DocumentFetcher> {
    inner: F,
    cache: ExpiringCache<(String, F::Document)>,
}

impl<F: DocumentFetcher> CachedFetcher<F> {
    pub fn new(inner: F, config: CacheConfig) -> Self {
        Self {
            inner,
            cache: ExpiringCache::new("documents", config),
        }
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn cached(&self, identifier: &str) -> Option<F::Document> {
        self.cache
            .with_fresh(|(key, doc)| (key == identifier).then(|| doc.clone()))
            .flatten()
    }
}

#[async_trait]
impl<F: DocumentFetcher> DocumentFetcher for CachedFetcher<F> {
    type Document = F::Document;

    async fn fetch(&self, identifier: &str) -> Result<Self::Document> {
        if let Some(doc) = self.cached(identifier) {
            debug!("Document cache hit for {}", identifier);
            return Ok(doc);
        }

        debug!("Document cache miss for {}", identifier);
        let doc = self.inner.fetch(identifier).await?;
        self.cache.insert((identifier.to_string(), doc.clone()));

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Backend that fails for the first `fail_first` calls.
    struct FlakyFetcher {
        calls: AtomicUsize,
        fail_first: usize,
        down: AtomicBool,
    }

    impl FlakyFetcher {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
                down: AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentFetcher for FlakyFetcher {
        type Document = Arc<String>;

        async fn fetch(&self, identifier: &str) -> Result<Self::Document> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first || self.down.load(Ordering::SeqCst) {
                return Err(anyhow::anyhow!("connection reset").into());
            }
            Ok(Arc::new(format!("<html>{identifier}#{n}</html>")))
        }
    }

    fn cached(fail_first: usize, ttl: Duration) -> CachedFetcher<FlakyFetcher> {
        CachedFetcher::new(FlakyFetcher::new(fail_first), CacheConfig::with_ttl(ttl))
    }

    #[tokio::test]
    async fn test_failure_then_cached_success() {
        let fetcher = cached(1, Duration::from_secs(60));

        let err = fetcher.fetch("rankings").await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert_eq!(err.to_string(), "connection reset");

        let first = fetcher.fetch("rankings").await.unwrap();
        let second = fetcher.fetch("rankings").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_refetches_after_expiry() {
        let fetcher = cached(0, Duration::from_millis(30));

        let first = fetcher.fetch("wiki/Fire").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = fetcher.fetch("wiki/Fire").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fetcher.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_other_identifier_is_a_miss() {
        let fetcher = cached(0, Duration::from_secs(60));

        let fire = fetcher.fetch("wiki/Fire").await.unwrap();
        let ice = fetcher.fetch("wiki/Ice").await.unwrap();

        assert!(fire.contains("wiki/Fire"));
        assert!(ice.contains("wiki/Ice"));
        assert_eq!(fetcher.inner().calls(), 2);

        // Single slot: Ice replaced Fire
        fetcher.fetch("wiki/Fire").await.unwrap();
        assert_eq!(fetcher.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_entry() {
        let fetcher = cached(0, Duration::from_secs(60));
        let doc = fetcher.fetch("tourneys").await.unwrap();

        fetcher.inner().down.store(true, Ordering::SeqCst);
        assert!(fetcher.fetch("rankings").await.is_err());

        // The failed miss left the tourneys slot in place.
        assert_eq!(fetcher.fetch("tourneys").await.unwrap(), doc);
        assert_eq!(fetcher.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_decorators_stack() {
        let outer = CachedFetcher::new(
            cached(0, Duration::from_secs(60)),
            CacheConfig::with_ttl(Duration::from_secs(60)),
        );

        outer.fetch("pets").await.unwrap();
        outer.fetch("pets").await.unwrap();
        assert_eq!(outer.inner().inner().calls(), 1);
    }
}
