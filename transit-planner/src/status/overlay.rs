//! Memoized, fail-soft live status overlay.
//!
//! At most one fetch is in flight at a time. The first caller triggers it;
//! callers arriving meanwhile, whether through first use or an explicit
//! refresh, wait for that fetch and share its result instead of issuing
//! their own. A failed fetch never surfaces as an
//! error: the overlay keeps serving the last good snapshot, or an empty one
//! if the feed has never answered. Empty means "no disruption penalty".

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache as MokaCache;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::client::StatusSource;
use super::snapshot::LiveStatus;

/// Configuration for the overlay cache.
#[derive(Debug, Clone, Default)]
pub struct OverlayConfig {
    /// How long a snapshot is served before the next caller refetches.
    /// `None` keeps the first snapshot for the process lifetime.
    pub ttl: Option<Duration>,
}

impl OverlayConfig {
    /// Expire snapshots after the given duration.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Live status overlay over a [`StatusSource`].
pub struct LiveStatusOverlay<S> {
    source: S,
    snapshot: MokaCache<(), Arc<LiveStatus>>,
    last_good: RwLock<Arc<LiveStatus>>,
    /// Held for the whole fetch-and-publish sequence.
    fetch_lock: Mutex<()>,
    /// Number of completed fetches.
    generation: AtomicU64,
}

impl<S: StatusSource> LiveStatusOverlay<S> {
    /// Create a new overlay. Nothing is fetched until first use.
    pub fn new(source: S, config: &OverlayConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(1);
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            source,
            snapshot: builder.build(),
            last_good: RwLock::new(Arc::new(LiveStatus::empty())),
            fetch_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot, fetching it on first use.
    pub async fn snapshot(&self) -> Arc<LiveStatus> {
        self.snapshot.get_with((), self.fetch_single_flight(false)).await
    }

    /// Fetch now and replace the memoized snapshot.
    ///
    /// Returns the snapshot now in effect, which is the previous good one
    /// if the fetch failed. If another fetch completes while this call waits
    /// its turn, that fetch's result is returned without fetching again.
    pub async fn refresh(&self) -> Arc<LiveStatus> {
        self.fetch_single_flight(true).await
    }

    /// Drop the memoized snapshot; the next caller refetches.
    pub async fn invalidate(&self) {
        self.snapshot.invalidate(&()).await;
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch_single_flight(&self, publish: bool) -> Arc<LiveStatus> {
        let seen = self.generation.load(Ordering::Acquire);
        let _guard = self.fetch_lock.lock().await;

        if self.generation.load(Ordering::Acquire) != seen {
            debug!("Sharing status fetched while waiting");
            return self.last_good.read().await.clone();
        }

        let status = self.fetch_or_fallback().await;
        if publish {
            self.snapshot.insert((), status.clone()).await;
        }
        self.generation.fetch_add(1, Ordering::Release);
        status
    }

    async fn fetch_or_fallback(&self) -> Arc<LiveStatus> {
        match self.source.fetch().await {
            Ok(records) => {
                let status = Arc::new(LiveStatus::from_records(
                    records.into_iter().map(|r| (r.name, r.situation)),
                    Some(Utc::now()),
                ));
                info!(lines = status.len(), "Fetched live line status");
                *self.last_good.write().await = status.clone();
                status
            }
            Err(e) => {
                let previous = self.last_good.read().await.clone();
                warn!(
                    error = %e,
                    fallback_lines = previous.len(),
                    "Live status unavailable, using previous snapshot"
                );
                previous
            }
        }
    }
}
