//! Caching layer for feed snapshots.
//!
//! GBFS providers publish a `ttl` telling clients how often the feeds
//! change. Page loads inside that window share one upstream fetch; the
//! classifier still runs from scratch on every request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::gbfs::{FeedSnapshot, FeedSource, GbfsError};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for a cached snapshot.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
        }
    }
}

/// Feed source with a cached snapshot.
///
/// There is only ever one snapshot, so the cache is keyed by `()`.
pub struct CachedFeed {
    source: FeedSource,
    snapshots: MokaCache<(), Arc<FeedSnapshot>>,
}

impl CachedFeed {
    /// Create a new cached feed.
    pub fn new(source: FeedSource, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { source, snapshots }
    }

    /// Get the current snapshot, fetching both feeds if the cache is cold.
    ///
    /// Fetch errors are returned as-is and nothing is cached.
    pub async fn snapshot(&self) -> Result<Arc<FeedSnapshot>, GbfsError> {
        if let Some(cached) = self.snapshots.get(&()).await {
            return Ok(cached);
        }

        debug!(source = self.source.kind(), "snapshot cache miss");
        let snapshot = Arc::new(self.source.fetch_snapshot().await?);
        self.snapshots.insert((), snapshot.clone()).await;

        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next call refetches.
    pub fn invalidate(&self) {
        self.snapshots.invalidate_all();
    }
}
