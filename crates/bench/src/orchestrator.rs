//! Benchmark orchestration: sweep prompts across models, record one
//! performance result per (model, prompt).

use std::sync::Arc;

use frontier_core::{
    traits::{MetricsStore, QualityJudge},
    types::{PerformanceRecord, RunStatus},
    Error, Result,
};
use frontier_providers::{PricingRegistry, ProviderRegistry};

use crate::prompts::BenchmarkPrompt;

/// Outcome counts for one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The run that was executed.
    pub run_id: String,
    /// Records written, failed generations included.
    pub recorded: usize,
    /// Records that carry a failure note.
    pub failures: usize,
}

/// Drives benchmark runs: generate, judge, price, record.
pub struct BenchmarkOrchestrator {
    store: Arc<dyn MetricsStore>,
    providers: Arc<ProviderRegistry>,
    pricing: Arc<PricingRegistry>,
    judge: Arc<dyn QualityJudge>,
    max_tokens: u32,
}

impl BenchmarkOrchestrator {
    pub fn new(
        store: Arc<dyn MetricsStore>,
        providers: Arc<ProviderRegistry>,
        pricing: Arc<PricingRegistry>,
        judge: Arc<dyn QualityJudge>,
    ) -> Self {
        Self {
            store,
            providers,
            pricing,
            judge,
            max_tokens: 1000,
        }
    }

    /// Token cap passed to providers for each generation.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Run the full sweep: every prompt against every model, models in
    /// parallel, prompts per model in sequence.
    ///
    /// Generation and judging failures are recorded as zero-quality results
    /// rather than aborting the sweep; only store failures abort. A model
    /// that crosses the registry's degradation floor mid-sweep stops
    /// receiving prompts.
    pub async fn run(
        &self,
        model_ids: &[String],
        prompts: &[BenchmarkPrompt],
    ) -> Result<RunReport> {
        if model_ids.is_empty() {
            return Err(Error::config("benchmark run needs at least one model"));
        }
        if prompts.is_empty() {
            return Err(Error::config("benchmark run needs at least one prompt"));
        }
        // Validate the whole roster before spending any provider budget.
        for model_id in model_ids {
            if self.providers.get(model_id).is_none() {
                return Err(Error::provider(format!(
                    "no generator registered for '{}'",
                    model_id
                )));
            }
            if self.pricing.get(model_id).is_none() {
                return Err(Error::config(format!(
                    "no pricing configured for '{}'",
                    model_id
                )));
            }
        }

        let total = (model_ids.len() * prompts.len()) as u32;
        let run = self.store.create_run(total).await?;
        tracing::info!(
            run_id = %run.id,
            models = model_ids.len(),
            prompts = prompts.len(),
            "benchmark run started"
        );

        let sweeps = model_ids
            .iter()
            .map(|model_id| self.sweep_model(&run.id, model_id, prompts));
        let outcomes = futures::future::join_all(sweeps).await;

        let mut recorded = 0;
        let mut failures = 0;
        let mut first_error = None;
        for outcome in outcomes {
            match outcome {
                Ok((swept, failed)) => {
                    recorded += swept;
                    failures += failed;
                }
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        let status = if first_error.is_some() {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };
        self.store.complete_run(&run.id, status).await?;

        if let Some(error) = first_error {
            return Err(error);
        }
        tracing::info!(run_id = %run.id, recorded, failures, "benchmark run completed");
        Ok(RunReport {
            run_id: run.id,
            recorded,
            failures,
        })
    }

    async fn sweep_model(
        &self,
        run_id: &str,
        model_id: &str,
        prompts: &[BenchmarkPrompt],
    ) -> Result<(usize, usize)> {
        let mut recorded = 0;
        let mut failures = 0;
        for prompt in prompts {
            if self.providers.is_degraded(model_id) {
                tracing::warn!(
                    model_id,
                    run_id,
                    recorded,
                    "provider degraded, skipping its remaining prompts"
                );
                break;
            }
            let record = self.bench_one(run_id, model_id, prompt).await?;
            if record.error.is_some() {
                failures += 1;
            }
            self.store.record(&record).await?;
            recorded += 1;
        }
        tracing::debug!(model_id, run_id, recorded, failures, "model sweep finished");
        Ok((recorded, failures))
    }

    /// One (model, prompt) measurement.
    async fn bench_one(
        &self,
        run_id: &str,
        model_id: &str,
        prompt: &BenchmarkPrompt,
    ) -> Result<PerformanceRecord> {
        let generator = self
            .providers
            .get(model_id)
            .ok_or_else(|| Error::provider(format!("no generator registered for '{}'", model_id)))?;
        let pricing = self
            .pricing
            .get(model_id)
            .ok_or_else(|| Error::config(format!("no pricing configured for '{}'", model_id)))?;

        let generation = match generator.generate(prompt.text, self.max_tokens).await {
            Ok(generation) => generation,
            Err(error) => {
                self.providers.record_failure(model_id);
                tracing::warn!(model_id, prompt_id = prompt.id, %error, "generation failed");
                return Ok(
                    PerformanceRecord::failed(model_id, prompt.category, error.to_string())
                        .with_run(run_id, prompt.id),
                );
            }
        };
        self.providers.record_success(model_id);

        let cost = pricing.cost_of(generation.input_tokens, generation.output_tokens);
        let record = match self
            .judge
            .score(prompt.text, &generation.text, prompt.category)
            .await
        {
            Ok(judgement) => PerformanceRecord::new(
                model_id,
                prompt.category,
                judgement.score,
                cost,
                generation.latency_ms,
                generation.tokens_per_second(),
            )?,
            Err(error) => {
                // The generation itself succeeded and cost money; keep its
                // stats and record the scoring failure alongside.
                tracing::warn!(model_id, prompt_id = prompt.id, %error, "judging failed");
                PerformanceRecord::new(
                    model_id,
                    prompt.category,
                    0.0,
                    cost,
                    generation.latency_ms,
                    generation.tokens_per_second(),
                )?
                .with_error(format!("judge: {}", error))
            }
        };

        Ok(record
            .with_run(run_id, prompt.id)
            .with_tokens(generation.input_tokens, generation.output_tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use frontier_core::traits::Judgement;
    use frontier_core::types::RecordFilter;
    use frontier_providers::{MockGenerator, ModelPricing};
    use frontier_store::MemoryMetricsStore;

    use crate::judge::ScriptedJudge;
    use crate::prompts;

    fn pricing_for(models: &[&str]) -> Arc<PricingRegistry> {
        let mut registry = PricingRegistry::new();
        for model in models {
            registry.register(ModelPricing::new(*model, "mock", 0.5, 1.5));
        }
        Arc::new(registry)
    }

    fn scripted(pairs: &[(&str, f64)]) -> Arc<ScriptedJudge> {
        let scores: BTreeMap<String, f64> = pairs
            .iter()
            .map(|(marker, score)| (format!("[{}]", marker), *score))
            .collect();
        Arc::new(ScriptedJudge::keyed(scores, 0.0))
    }

    #[tokio::test]
    async fn test_sweep_records_every_model_prompt_pair() {
        let store = Arc::new(MemoryMetricsStore::new());
        let providers = Arc::new(ProviderRegistry::new());
        providers.register("mock:a", Arc::new(MockGenerator::new("mock:a")));
        providers.register("mock:b", Arc::new(MockGenerator::new("mock:b")));

        let orchestrator = BenchmarkOrchestrator::new(
            store.clone(),
            providers,
            pricing_for(&["mock:a", "mock:b"]),
            scripted(&[("mock:a", 0.9), ("mock:b", 0.6)]),
        );

        let prompts = prompts::by_category("coding");
        let models = vec!["mock:a".to_string(), "mock:b".to_string()];
        let report = orchestrator.run(&models, &prompts).await.unwrap();

        assert_eq!(report.recorded, 10);
        assert_eq!(report.failures, 0);

        let run = store.get_run(&report.run_id).await.unwrap().unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.total_prompts, 10);

        let records = store
            .query(&RecordFilter::all().with_model("mock:a"))
            .await
            .unwrap();
        assert_eq!(records.len(), 5);
        for record in &records {
            assert_eq!(record.quality_score, 0.9);
            assert_eq!(record.run_id.as_deref(), Some(report.run_id.as_str()));
            assert!(record.cost_usd > 0.0);
            assert!(record.output_tokens > 0);
        }
    }

    #[tokio::test]
    async fn test_failed_generations_recorded_not_dropped() {
        let store = Arc::new(MemoryMetricsStore::new());
        let providers = Arc::new(ProviderRegistry::new());
        providers.register("mock:ok", Arc::new(MockGenerator::new("mock:ok")));
        providers.register("mock:down", Arc::new(MockGenerator::failing("mock:down")));

        let orchestrator = BenchmarkOrchestrator::new(
            store.clone(),
            providers,
            pricing_for(&["mock:ok", "mock:down"]),
            scripted(&[("mock:ok", 0.8)]),
        );

        let prompts = prompts::by_category("coding");
        let models = vec!["mock:down".to_string(), "mock:ok".to_string()];
        let report = orchestrator.run(&models, &prompts).await.unwrap();

        assert_eq!(report.recorded, 10);
        assert_eq!(report.failures, 5);

        let down = store
            .query(&RecordFilter::all().with_model("mock:down"))
            .await
            .unwrap();
        assert_eq!(down.len(), 5);
        for record in &down {
            assert_eq!(record.quality_score, 0.0);
            assert!(record.error.is_some());
        }
    }

    #[tokio::test]
    async fn test_degraded_provider_skips_remaining_prompts() {
        let store = Arc::new(MemoryMetricsStore::new());
        let providers = Arc::new(ProviderRegistry::new());
        providers.register("mock:ok", Arc::new(MockGenerator::new("mock:ok")));
        providers.register("mock:down", Arc::new(MockGenerator::failing("mock:down")));

        let orchestrator = BenchmarkOrchestrator::new(
            store.clone(),
            providers,
            pricing_for(&["mock:ok", "mock:down"]),
            scripted(&[("mock:ok", 0.8)]),
        );

        // Fifteen prompts: the failing model hits the ten-request
        // degradation floor and loses its last five.
        let models = vec!["mock:down".to_string(), "mock:ok".to_string()];
        let report = orchestrator
            .run(&models, prompts::BUILTIN_PROMPTS)
            .await
            .unwrap();

        assert_eq!(report.recorded, 25);
        assert_eq!(report.failures, 10);

        let down = store
            .query(&RecordFilter::all().with_model("mock:down"))
            .await
            .unwrap();
        assert_eq!(down.len(), 10);
        let ok = store
            .query(&RecordFilter::all().with_model("mock:ok"))
            .await
            .unwrap();
        assert_eq!(ok.len(), 15);
    }

    struct UnavailableJudge;

    #[async_trait]
    impl QualityJudge for UnavailableJudge {
        async fn score(&self, _: &str, _: &str, _: &str) -> Result<Judgement> {
            Err(Error::provider("judge offline"))
        }
    }

    #[tokio::test]
    async fn test_judge_failure_keeps_generation_cost() {
        let store = Arc::new(MemoryMetricsStore::new());
        let providers = Arc::new(ProviderRegistry::new());
        providers.register("mock:a", Arc::new(MockGenerator::new("mock:a")));

        let orchestrator = BenchmarkOrchestrator::new(
            store.clone(),
            providers,
            pricing_for(&["mock:a"]),
            Arc::new(UnavailableJudge),
        );

        let prompts = prompts::by_category("coding");
        let report = orchestrator
            .run(&["mock:a".to_string()], &prompts[..1])
            .await
            .unwrap();
        assert_eq!(report.failures, 1);

        let records = store.query(&RecordFilter::all()).await.unwrap();
        assert_eq!(records[0].quality_score, 0.0);
        assert!(records[0].cost_usd > 0.0);
        assert!(records[0].error.as_deref().unwrap().starts_with("judge:"));
    }

    #[tokio::test]
    async fn test_roster_validated_before_running() {
        let store = Arc::new(MemoryMetricsStore::new());
        let providers = Arc::new(ProviderRegistry::new());
        providers.register("mock:a", Arc::new(MockGenerator::new("mock:a")));

        // Registered but unpriced.
        let orchestrator = BenchmarkOrchestrator::new(
            store.clone(),
            providers,
            Arc::new(PricingRegistry::new()),
            Arc::new(ScriptedJudge::fixed(0.5)),
        );

        let prompts = prompts::by_category("coding");
        let err = orchestrator
            .run(&["mock:a".to_string()], &prompts)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(store.record_count().await.unwrap(), 0);
    }
}
