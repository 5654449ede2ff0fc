//! Metrics persistence traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BenchmarkRun, PerformanceRecord, RecordFilter, RunStatus};

/// Persistence boundary for performance records and benchmark runs.
///
/// The engine treats this as a read source returning finite, possibly-empty
/// sequences; the benchmark orchestrator is the only writer.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Persist one validated performance record.
    async fn record(&self, record: &PerformanceRecord) -> Result<()>;

    /// Fetch records matching a filter, newest first when limited.
    async fn query(&self, filter: &RecordFilter) -> Result<Vec<PerformanceRecord>>;

    /// Total number of stored records.
    async fn record_count(&self) -> Result<usize>;

    /// Open a new benchmark run in `Running` state.
    async fn create_run(&self, total_prompts: u32) -> Result<BenchmarkRun>;

    /// Move a run to a terminal status, stamping its completion time.
    async fn complete_run(&self, run_id: &str, status: RunStatus) -> Result<()>;

    /// Look up a run by id.
    async fn get_run(&self, run_id: &str) -> Result<Option<BenchmarkRun>>;
}
