//! The published frontier snapshot and its refresh lifecycle.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use chrono::Utc;

use frontier_core::{
    traits::MetricsStore,
    types::{FrontierSnapshot, RecordFilter},
    Result,
};

use crate::frontier::build_snapshot;

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Records read from the metrics store.
    pub records: usize,
    /// Models in the refreshed all-categories view.
    pub models: usize,
    /// Category views published.
    pub categories: usize,
    /// Wall time spent aggregating and ranking.
    pub elapsed_ms: u64,
}

/// Holds the currently published snapshot and serializes refreshes.
///
/// Readers clone the inner `Arc` out under a momentary read lock and keep
/// using that snapshot for as long as they like. A refresh builds the whole
/// replacement off to the side and swaps the reference in one write, so a
/// reader observes either the fully old or the fully new snapshot, never a
/// partial one.
pub struct FrontierCache {
    store: Arc<dyn MetricsStore>,
    current: RwLock<Arc<FrontierSnapshot>>,
    refresh_gate: tokio::sync::Mutex<()>,
    min_samples: usize,
}

impl FrontierCache {
    /// Cache over a metrics store, publishing the empty snapshot until the
    /// first refresh.
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Arc::new(FrontierSnapshot::empty())),
            refresh_gate: tokio::sync::Mutex::new(()),
            min_samples: 1,
        }
    }

    /// Require at least this many observations per model before ranking it.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples.max(1);
        self
    }

    /// The currently published snapshot.
    pub fn current(&self) -> Arc<FrontierSnapshot> {
        // A poisoned lock still holds a complete snapshot; keep serving it.
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Rebuild the snapshot from the store and publish it atomically.
    ///
    /// Concurrent callers are serialized; each waiting caller runs its own
    /// full refresh in turn, which is wasteful but harmless since the
    /// computation is idempotent over a consistent store read.
    pub async fn refresh(&self) -> Result<RefreshStats> {
        let _gate = self.refresh_gate.lock().await;
        let started = Instant::now();

        let records = self.store.query(&RecordFilter::all()).await?;
        let snapshot = Arc::new(build_snapshot(&records, self.min_samples));

        let stats = RefreshStats {
            records: snapshot.record_count,
            models: snapshot.overall.model_count(),
            categories: snapshot.by_category.len(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        {
            let mut current = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *current = snapshot;
        }

        tracing::info!(
            records = stats.records,
            models = stats.models,
            categories = stats.categories,
            elapsed_ms = stats.elapsed_ms,
            "frontier snapshot refreshed"
        );
        Ok(stats)
    }

    /// Advisory staleness check. A stale snapshot is still served; callers
    /// may surface the condition but never fail on it.
    pub fn is_stale(&self, max_age: chrono::Duration) -> bool {
        match self.current().age(Utc::now()) {
            None => true,
            Some(age) => age > max_age,
        }
    }
}

/// Spawn a periodic refresh task. Failures are logged and the loop keeps
/// going; the cache continues serving the last good snapshot.
pub fn spawn_refresh_loop(
    cache: Arc<FrontierCache>,
    every: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it so the loop only
        // fires on the interval after the caller's initial refresh.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(error) = cache.refresh().await {
                tracing::warn!(%error, "scheduled frontier refresh failed");
            }
        }
    })
}
