//! In-memory metrics store implementation using DashMap.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use frontier_core::{
    traits::MetricsStore,
    types::{BenchmarkRun, PerformanceRecord, RecordFilter, RunStatus},
    Error, Result,
};

/// In-memory metrics store using DashMap for concurrent access.
///
/// Records are grouped per model. Suitable for development, tests, and
/// deployments that can afford to re-benchmark on restart.
#[derive(Debug, Default)]
pub struct MemoryMetricsStore {
    /// Records keyed by model id.
    records: DashMap<String, Vec<PerformanceRecord>>,
    /// Benchmark runs keyed by run id.
    runs: DashMap<String, BenchmarkRun>,
}

impl MemoryMetricsStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.iter().map(|r| r.value().len()).sum()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all records and runs.
    pub fn clear(&self) {
        self.records.clear();
        self.runs.clear();
    }
}

#[async_trait]
impl MetricsStore for MemoryMetricsStore {
    async fn record(&self, record: &PerformanceRecord) -> Result<()> {
        record.validate()?;

        tracing::trace!(
            model_id = %record.model_id,
            category = %record.category,
            quality = record.quality_score,
            cost = record.cost_usd,
            "Storing performance record in memory"
        );

        self.records
            .entry(record.model_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn query(&self, filter: &RecordFilter) -> Result<Vec<PerformanceRecord>> {
        let mut matched: Vec<PerformanceRecord> = self
            .records
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        // Newest first, model id as the deterministic tie-break.
        matched.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.model_id.cmp(&b.model_id))
        });

        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn record_count(&self) -> Result<usize> {
        Ok(self.len())
    }

    async fn create_run(&self, total_prompts: u32) -> Result<BenchmarkRun> {
        let run = BenchmarkRun {
            id: Uuid::new_v4().to_string(),
            status: RunStatus::Running,
            total_prompts,
            started_at: Utc::now(),
            completed_at: None,
        };
        self.runs.insert(run.id.clone(), run.clone());
        Ok(run)
    }

    async fn complete_run(&self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut entry = self
            .runs
            .get_mut(run_id)
            .ok_or_else(|| Error::RunNotFound(run_id.to_string()))?;
        entry.status = status;
        entry.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn get_run(&self, run_id: &str) -> Result<Option<BenchmarkRun>> {
        Ok(self.runs.get(run_id).map(|r| r.clone()))
    }
}
