//! Full pipeline: benchmark sweep, aggregation, frontier build, routing.

use std::collections::BTreeMap;
use std::sync::Arc;

use frontier_bench::{BenchmarkOrchestrator, RunReport, ScriptedJudge, BUILTIN_PROMPTS};
use frontier_core::config::ModelPricingEntry;
use frontier_core::traits::MetricsStore;
use frontier_core::types::{RejectionReason, RouteQuery, RunStatus};
use frontier_core::Error;
use frontier_engine::{FrontierCache, ValueRouter};
use frontier_providers::{MockGenerator, PricingRegistry, ProviderRegistry};
use frontier_store::MemoryMetricsStore;

fn pricing_entry(model_id: &str, input_rate: f64, output_rate: f64) -> ModelPricingEntry {
    ModelPricingEntry {
        model_id: model_id.to_string(),
        provider: "mock".to_string(),
        input_cost_per_1k: input_rate,
        output_cost_per_1k: output_rate,
        max_context_tokens: 128_000,
    }
}

struct Pipeline {
    store: Arc<MemoryMetricsStore>,
    cache: Arc<FrontierCache>,
    router: ValueRouter,
    report: RunReport,
}

/// Benchmark three mock models whose quality rises with price: economy
/// (0.70), standard (0.85), premium (0.95). Per-record costs land around
/// $0.0003, $0.0008, and $0.0021 respectively.
async fn benchmarked_pipeline() -> Pipeline {
    let store = Arc::new(MemoryMetricsStore::new());

    let providers = Arc::new(ProviderRegistry::new());
    providers.register(
        "economy",
        Arc::new(MockGenerator::new("economy").with_latency(90.0)),
    );
    providers.register(
        "standard",
        Arc::new(MockGenerator::new("standard").with_latency(160.0)),
    );
    providers.register(
        "premium",
        Arc::new(MockGenerator::new("premium").with_latency(420.0)),
    );

    let pricing = Arc::new(PricingRegistry::from_entries(&[
        pricing_entry("economy", 0.0005, 0.0015),
        pricing_entry("standard", 0.001, 0.004),
        pricing_entry("premium", 0.0025, 0.01),
    ]));

    let judge = Arc::new(ScriptedJudge::keyed(
        BTreeMap::from([
            ("[economy]".to_string(), 0.70),
            ("[standard]".to_string(), 0.85),
            ("[premium]".to_string(), 0.95),
        ]),
        0.5,
    ));

    let orchestrator = BenchmarkOrchestrator::new(store.clone(), providers, pricing, judge);

    let roster: Vec<String> = ["economy", "standard", "premium"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let report = orchestrator.run(&roster, BUILTIN_PROMPTS).await.unwrap();

    let cache = Arc::new(FrontierCache::new(store.clone()));
    cache.refresh().await.unwrap();
    let router = ValueRouter::new(cache.clone());

    Pipeline {
        store,
        cache,
        router,
        report,
    }
}

#[tokio::test]
async fn test_sweep_produces_complete_run() {
    let pipeline = benchmarked_pipeline().await;

    // 3 models x 15 built-in prompts.
    assert_eq!(pipeline.report.recorded, 45);
    assert_eq!(pipeline.report.failures, 0);
    assert_eq!(pipeline.store.record_count().await.unwrap(), 45);

    let run = pipeline
        .store
        .get_run(&pipeline.report.run_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.total_prompts, 45);
    assert!(run.completed_at.is_some());
}

#[tokio::test]
async fn test_frontier_ranks_by_value() {
    let pipeline = benchmarked_pipeline().await;
    let snapshot = pipeline.cache.current();

    assert_eq!(snapshot.record_count, 45);

    let categories: Vec<&str> = snapshot.by_category.keys().map(String::as_str).collect();
    assert_eq!(categories, ["coding", "creative_writing", "summarization"]);

    // Cheap-and-decent beats expensive-and-great on quality per dollar.
    let ids: Vec<&str> = snapshot
        .overall
        .entries
        .iter()
        .map(|e| e.model_id())
        .collect();
    assert_eq!(ids, ["economy", "standard", "premium"]);

    for (i, entry) in snapshot.overall.entries.iter().enumerate() {
        assert_eq!(entry.rank, i + 1);
        // Quality strictly rises with cost here, so nobody is dominated.
        assert!(entry.is_value_king);
        assert_eq!(entry.summary.sample_count, 15);
    }

    let coding = &snapshot.by_category["coding"];
    assert_eq!(coding.entries.len(), 3);
    assert_eq!(coding.entries[0].summary.sample_count, 5);
}

#[tokio::test]
async fn test_routing_prefers_cheapest_meeting_threshold() {
    let pipeline = benchmarked_pipeline().await;

    let decision = pipeline.router.select(&RouteQuery::new(0.80)).unwrap();
    assert_eq!(decision.selected_model_id, "standard");
    // Mean of 15 identical scores, up to summation rounding.
    assert!((decision.expected_quality - 0.85).abs() < 1e-9);
    assert_eq!(decision.expected_latency_ms, 160.0);
    assert!(decision.is_value_king);
    assert!(decision.reasoning.contains("cheapest model"));
    assert!(matches!(
        decision.rejected.get("economy"),
        Some(RejectionReason::QualityBelowThreshold { .. })
    ));

    let decision = pipeline.router.select(&RouteQuery::new(0.90)).unwrap();
    assert_eq!(decision.selected_model_id, "premium");

    let decision = pipeline.router.select(&RouteQuery::new(0.0)).unwrap();
    assert_eq!(decision.selected_model_id, "economy");

    let decision = pipeline
        .router
        .select(&RouteQuery::new(0.80).with_category("coding"))
        .unwrap();
    assert_eq!(decision.selected_model_id, "standard");
    assert_eq!(decision.candidates_considered.len(), 3);
}

#[tokio::test]
async fn test_budget_and_threshold_interplay() {
    let pipeline = benchmarked_pipeline().await;

    // A budget nobody above the threshold fits: economy fails quality,
    // standard and premium fail cost.
    let err = pipeline
        .router
        .select(&RouteQuery::new(0.80).with_max_cost(0.0005))
        .unwrap_err();

    let Error::NoEligibleModel {
        quality_threshold,
        max_cost,
        rejected,
    } = err
    else {
        panic!("expected NoEligibleModel, got {:?}", err);
    };
    assert_eq!(quality_threshold, 0.80);
    assert_eq!(max_cost, Some(0.0005));
    assert_eq!(rejected.len(), 3);
    assert!(matches!(
        rejected.get("economy"),
        Some(RejectionReason::QualityBelowThreshold { .. })
    ));
    assert!(matches!(
        rejected.get("standard"),
        Some(RejectionReason::CostAboveLimit { .. })
    ));
    assert!(matches!(
        rejected.get("premium"),
        Some(RejectionReason::CostAboveLimit { .. })
    ));
}
