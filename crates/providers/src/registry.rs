//! Registry of text generators, keyed by model id, with health tracking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use frontier_core::traits::TextGenerator;

/// Request counters for one registered model.
#[derive(Debug, Default)]
pub struct ProviderStatus {
    total_requests: AtomicU64,
    failed_requests: AtomicU64,
}

impl ProviderStatus {
    pub fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn failure_rate(&self) -> f64 {
        let total = self.total_requests.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            self.failed_requests.load(Ordering::Relaxed) as f64 / total as f64
        }
    }

    /// Majority-failing after a minimum of ten requests.
    pub fn is_degraded(&self) -> bool {
        self.total_requests.load(Ordering::Relaxed) >= 10 && self.failure_rate() > 0.5
    }
}

/// Registry of generation clients for all benchmarkable models.
pub struct ProviderRegistry {
    providers: DashMap<String, (Arc<dyn TextGenerator>, ProviderStatus)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a generator under a model id, replacing any previous one.
    pub fn register(&self, model_id: impl Into<String>, generator: Arc<dyn TextGenerator>) {
        let model_id = model_id.into();
        tracing::debug!(model_id = %model_id, "provider registered");
        self.providers
            .insert(model_id, (generator, ProviderStatus::default()));
    }

    /// The generator for a model, if registered.
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn TextGenerator>> {
        self.providers.get(model_id).map(|entry| entry.value().0.clone())
    }

    /// All registered model ids, sorted for deterministic sweeps.
    pub fn model_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Model ids that are not currently degraded, sorted.
    pub fn healthy_models(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .providers
            .iter()
            .filter(|entry| !entry.value().1.is_degraded())
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn record_success(&self, model_id: &str) {
        if let Some(entry) = self.providers.get(model_id) {
            entry.value().1.record_success();
        }
    }

    pub fn record_failure(&self, model_id: &str) {
        if let Some(entry) = self.providers.get(model_id) {
            entry.value().1.record_failure();
        }
    }

    pub fn failure_rate(&self, model_id: &str) -> Option<f64> {
        self.providers
            .get(model_id)
            .map(|entry| entry.value().1.failure_rate())
    }

    /// Whether a model has crossed the degradation floor. Unregistered
    /// models are not degraded, merely unknown.
    pub fn is_degraded(&self, model_id: &str) -> bool {
        self.providers
            .get(model_id)
            .map(|entry| entry.value().1.is_degraded())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
