//! SQLite-backed metrics store for single-node durable deployments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use frontier_core::{
    traits::MetricsStore,
    types::{BenchmarkRun, PerformanceRecord, RecordFilter, RunStatus},
    Error, Result,
};

/// SQLite-backed metrics store.
///
/// One connection behind an async mutex; statements are short and the
/// orchestrator is the only writer, so contention stays negligible.
pub struct SqliteMetricsStore {
    conn: Arc<tokio::sync::Mutex<Connection>>,
}

impl SqliteMetricsStore {
    /// Open (or create) the database at the given path.
    pub fn new(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::store(format!("open: {}", e)))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(tokio::sync::Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database. Used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::store(format!("open: {}", e)))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(tokio::sync::Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS benchmark_runs (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                total_prompts INTEGER NOT NULL,
                started_at TEXT NOT NULL,
                completed_at TEXT
            )",
            [],
        )
        .map_err(|e| Error::store(format!("schema: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS benchmark_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                model_id TEXT NOT NULL,
                category TEXT NOT NULL,
                quality_score REAL NOT NULL,
                cost_usd REAL NOT NULL,
                latency_ms REAL NOT NULL,
                tokens_per_second REAL NOT NULL,
                timestamp TEXT NOT NULL,
                run_id TEXT,
                prompt_id TEXT,
                input_tokens INTEGER NOT NULL,
                output_tokens INTEGER NOT NULL,
                error TEXT
            )",
            [],
        )
        .map_err(|e| Error::store(format!("schema: {}", e)))?;

        for index in [
            "CREATE INDEX IF NOT EXISTS idx_results_model ON benchmark_results (model_id)",
            "CREATE INDEX IF NOT EXISTS idx_results_category ON benchmark_results (category)",
        ] {
            conn.execute(index, [])
                .map_err(|e| Error::store(format!("index: {}", e)))?;
        }
        Ok(())
    }
}

#[async_trait]
impl MetricsStore for SqliteMetricsStore {
    async fn record(&self, record: &PerformanceRecord) -> Result<()> {
        record.validate()?;

        let conn = self.conn.clone();
        let record = record.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "INSERT INTO benchmark_results (
                    model_id, category, quality_score, cost_usd, latency_ms,
                    tokens_per_second, timestamp, run_id, prompt_id,
                    input_tokens, output_tokens, error
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    record.model_id,
                    record.category,
                    record.quality_score,
                    record.cost_usd,
                    record.latency_ms,
                    record.tokens_per_second,
                    record.timestamp,
                    record.run_id,
                    record.prompt_id,
                    record.input_tokens,
                    record.output_tokens,
                    record.error,
                ],
            )
            .map_err(|e| Error::store(format!("insert: {}", e)))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::store(e.to_string()))?
    }

    async fn query(&self, filter: &RecordFilter) -> Result<Vec<PerformanceRecord>> {
        let conn = self.conn.clone();
        let filter = filter.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let mut stmt = conn
                .prepare(
                    "SELECT model_id, category, quality_score, cost_usd, latency_ms,
                            tokens_per_second, timestamp, run_id, prompt_id,
                            input_tokens, output_tokens, error
                     FROM benchmark_results
                     ORDER BY timestamp DESC, model_id ASC",
                )
                .map_err(|e| Error::store(format!("prepare: {}", e)))?;

            let records = stmt
                .query_map([], |row| {
                    Ok(PerformanceRecord {
                        model_id: row.get(0)?,
                        category: row.get(1)?,
                        quality_score: row.get(2)?,
                        cost_usd: row.get(3)?,
                        latency_ms: row.get(4)?,
                        tokens_per_second: row.get(5)?,
                        timestamp: row.get::<_, DateTime<Utc>>(6)?,
                        run_id: row.get(7)?,
                        prompt_id: row.get(8)?,
                        input_tokens: row.get(9)?,
                        output_tokens: row.get(10)?,
                        error: row.get(11)?,
                    })
                })
                .map_err(|e| Error::store(format!("query: {}", e)))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::store(format!("row: {}", e)))?;

            // Predicate filtering stays in one place; benchmark tables are
            // small enough that a full scan is fine.
            let mut matched: Vec<PerformanceRecord> = records
                .into_iter()
                .filter(|r| filter.matches(r))
                .collect();
            if let Some(limit) = filter.limit {
                matched.truncate(limit);
            }
            Ok(matched)
        })
        .await
        .map_err(|e| Error::store(e.to_string()))?
    }

    async fn record_count(&self) -> Result<usize> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let count: usize = conn
                .query_row("SELECT COUNT(*) FROM benchmark_results", [], |row| {
                    row.get(0)
                })
                .map_err(|e| Error::store(format!("count: {}", e)))?;
            Ok(count)
        })
        .await
        .map_err(|e| Error::store(e.to_string()))?
    }

    async fn create_run(&self, total_prompts: u32) -> Result<BenchmarkRun> {
        let run = BenchmarkRun {
            id: Uuid::new_v4().to_string(),
            status: RunStatus::Running,
            total_prompts,
            started_at: Utc::now(),
            completed_at: None,
        };

        let conn = self.conn.clone();
        let stored = run.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "INSERT INTO benchmark_runs (id, status, total_prompts, started_at, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    stored.id,
                    stored.status.as_str(),
                    stored.total_prompts,
                    stored.started_at,
                    stored.completed_at,
                ],
            )
            .map_err(|e| Error::store(format!("insert run: {}", e)))?;
            Ok::<(), Error>(())
        })
        .await
        .map_err(|e| Error::store(e.to_string()))??;

        Ok(run)
    }

    async fn complete_run(&self, run_id: &str, status: RunStatus) -> Result<()> {
        let conn = self.conn.clone();
        let run_id = run_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let updated = conn
                .execute(
                    "UPDATE benchmark_runs SET status = ?1, completed_at = ?2 WHERE id = ?3",
                    params![status.as_str(), Utc::now(), run_id],
                )
                .map_err(|e| Error::store(format!("update run: {}", e)))?;
            if updated == 0 {
                return Err(Error::RunNotFound(run_id));
            }
            Ok(())
        })
        .await
        .map_err(|e| Error::store(e.to_string()))?
    }

    async fn get_run(&self, run_id: &str) -> Result<Option<BenchmarkRun>> {
        let conn = self.conn.clone();
        let run_id = run_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let run = conn
                .query_row(
                    "SELECT id, status, total_prompts, started_at, completed_at
                     FROM benchmark_runs WHERE id = ?1",
                    params![run_id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, u32>(2)?,
                            row.get::<_, DateTime<Utc>>(3)?,
                            row.get::<_, Option<DateTime<Utc>>>(4)?,
                        ))
                    },
                )
                .optional()
                .map_err(|e| Error::store(format!("get run: {}", e)))?;

            match run {
                None => Ok(None),
                Some((id, status, total_prompts, started_at, completed_at)) => {
                    Ok(Some(BenchmarkRun {
                        id,
                        status: status.parse()?,
                        total_prompts,
                        started_at,
                        completed_at,
                    }))
                }
            }
        })
        .await
        .map_err(|e| Error::store(e.to_string()))?
    }
}
