//! Raw performance observations and benchmark run bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One performance observation for a (model, prompt, run) triple.
///
/// Produced by the benchmark orchestrator, consumed read-only by the
/// aggregation pipeline. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Model identifier (e.g. "openai:gpt-4o-mini").
    pub model_id: String,
    /// Task category the prompt belongs to.
    pub category: String,
    /// Judge-assigned quality score in [0, 1].
    pub quality_score: f64,
    /// Total request cost in USD.
    pub cost_usd: f64,
    /// End-to-end latency in milliseconds.
    pub latency_ms: f64,
    /// Output throughput in tokens per second.
    pub tokens_per_second: f64,
    /// When the observation was taken.
    pub timestamp: DateTime<Utc>,
    /// Benchmark run this record belongs to, if any.
    pub run_id: Option<String>,
    /// Prompt identifier within the run, if any.
    pub prompt_id: Option<String>,
    /// Input tokens as reported by the provider.
    pub input_tokens: u64,
    /// Output tokens as reported by the provider.
    pub output_tokens: u64,
    /// Generation failure message. Failed generations are recorded with a
    /// zero quality score rather than dropped.
    pub error: Option<String>,
}

impl PerformanceRecord {
    /// Create a validated record with the current timestamp.
    pub fn new(
        model_id: impl Into<String>,
        category: impl Into<String>,
        quality_score: f64,
        cost_usd: f64,
        latency_ms: f64,
        tokens_per_second: f64,
    ) -> Result<Self> {
        let record = Self {
            model_id: model_id.into(),
            category: category.into(),
            quality_score,
            cost_usd,
            latency_ms,
            tokens_per_second,
            timestamp: Utc::now(),
            run_id: None,
            prompt_id: None,
            input_tokens: 0,
            output_tokens: 0,
            error: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Create a zero-quality record for a failed generation.
    pub fn failed(
        model_id: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            category: category.into(),
            quality_score: 0.0,
            cost_usd: 0.0,
            latency_ms: 0.0,
            tokens_per_second: 0.0,
            timestamp: Utc::now(),
            run_id: None,
            prompt_id: None,
            input_tokens: 0,
            output_tokens: 0,
            error: Some(message.into()),
        }
    }

    /// Attach run bookkeeping.
    pub fn with_run(mut self, run_id: impl Into<String>, prompt_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self.prompt_id = Some(prompt_id.into());
        self
    }

    /// Attach token counts as reported by the provider.
    pub fn with_tokens(mut self, input: u64, output: u64) -> Self {
        self.input_tokens = input;
        self.output_tokens = output;
        self
    }

    /// Attach a failure note while keeping the observed cost and latency.
    /// Used when the generation succeeded but could not be scored.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Check field ranges. Every numeric field must be finite; the quality
    /// score must lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.model_id.is_empty() {
            return Err(Error::invalid_record("model_id is empty"));
        }
        if !self.quality_score.is_finite() || !(0.0..=1.0).contains(&self.quality_score) {
            return Err(Error::invalid_record(format!(
                "quality_score {} is outside [0, 1]",
                self.quality_score
            )));
        }
        for (name, value) in [
            ("cost_usd", self.cost_usd),
            ("latency_ms", self.latency_ms),
            ("tokens_per_second", self.tokens_per_second),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_record(format!(
                    "{} {} is not a finite non-negative number",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Filter for metrics store queries. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Restrict to one model.
    pub model_id: Option<String>,
    /// Restrict to one category.
    pub category: Option<String>,
    /// Only records at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Cap the number of returned records (newest first).
    pub limit: Option<usize>,
}

impl RecordFilter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one model.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only records at or after `since`.
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Cap the number of returned records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes the non-limit predicates.
    pub fn matches(&self, record: &PerformanceRecord) -> bool {
        if let Some(ref model_id) = self.model_id {
            if &record.model_id != model_id {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &record.category != category {
                return false;
            }
        }
        if let Some(since) = self.since {
            if record.timestamp < since {
                return false;
            }
        }
        true
    }
}

/// Lifecycle status of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Stable string form used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for RunStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(Error::store(format!("unknown run status '{}'", other))),
        }
    }
}

/// One benchmark run: a sweep of the prompt set across registered models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Run identifier.
    pub id: String,
    /// Current status.
    pub status: RunStatus,
    /// Number of prompts in the sweep.
    pub total_prompts: u32,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished, if it has.
    pub completed_at: Option<DateTime<Utc>>,
}
