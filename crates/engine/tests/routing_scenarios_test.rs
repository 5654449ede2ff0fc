//! End-to-end routing scenarios over the memory store.

use std::sync::Arc;

use frontier_core::{
    traits::MetricsStore,
    types::{PerformanceRecord, RejectionReason, RouteQuery},
    Error,
};
use frontier_engine::{FrontierCache, ValueRouter};
use frontier_store::MemoryMetricsStore;

async fn seed(store: &MemoryMetricsStore, model: &str, quality: f64, cost: f64) {
    let record = PerformanceRecord::new(model, "coding", quality, cost, 500.0, 40.0).unwrap();
    store.record(&record).await.unwrap();
}

/// Store seeded with the standard three-model set, refreshed once.
async fn seeded_router() -> (Arc<MemoryMetricsStore>, Arc<FrontierCache>, ValueRouter) {
    let store = Arc::new(MemoryMetricsStore::new());
    seed(&store, "M1", 0.90, 0.02).await;
    seed(&store, "M2", 0.80, 0.01).await;
    seed(&store, "M3", 0.95, 0.05).await;

    let cache = Arc::new(FrontierCache::new(store.clone()));
    cache.refresh().await.unwrap();
    let router = ValueRouter::new(cache.clone());
    (store, cache, router)
}

#[tokio::test]
async fn test_cheapest_model_meeting_threshold_wins() {
    let (_, _, router) = seeded_router().await;

    let decision = router.select(&RouteQuery::new(0.85)).unwrap();

    // M2 misses the bar; of M1 and M3, M1 is cheaper.
    assert_eq!(decision.selected_model_id, "M1");
    assert_eq!(decision.candidates_considered.len(), 3);
    assert_eq!(decision.rejected.len(), 1);
    let reason = &decision.rejected["M2"];
    assert!(matches!(reason, RejectionReason::QualityBelowThreshold { .. }));
    assert!(reason.to_string().contains("quality below threshold"));
    assert!(decision.reasoning.contains("M1"));
}

#[tokio::test]
async fn test_unreachable_threshold_rejects_everyone() {
    let (_, _, router) = seeded_router().await;

    let err = router.select(&RouteQuery::new(0.99)).unwrap_err();

    let Error::NoEligibleModel {
        quality_threshold,
        max_cost,
        rejected,
    } = err
    else {
        panic!("expected NoEligibleModel");
    };
    assert_eq!(quality_threshold, 0.99);
    assert_eq!(max_cost, None);
    assert_eq!(rejected.len(), 3);
    for model in ["M1", "M2", "M3"] {
        assert!(matches!(
            rejected[model],
            RejectionReason::QualityBelowThreshold { .. }
        ));
    }
}

#[tokio::test]
async fn test_cost_ceiling_rejections_name_the_unmet_constraint() {
    let (_, _, router) = seeded_router().await;

    let query = RouteQuery::new(0.85).with_max_cost(0.015);
    let err = router.select(&query).unwrap_err();

    let Error::NoEligibleModel { rejected, .. } = err else {
        panic!("expected NoEligibleModel");
    };
    assert_eq!(rejected.len(), 3);
    // M1 passes quality but breaks the ceiling; M2 never reaches the quality
    // check's bar; M3 passes quality and breaks the ceiling.
    assert!(matches!(rejected["M1"], RejectionReason::CostAboveLimit { .. }));
    assert!(matches!(
        rejected["M2"],
        RejectionReason::QualityBelowThreshold { .. }
    ));
    assert!(matches!(rejected["M3"], RejectionReason::CostAboveLimit { .. }));
    assert!(rejected["M1"].to_string().contains("cost exceeds max_cost"));
}

#[tokio::test]
async fn test_free_model_unranked_but_selectable() {
    let (store, cache, router) = seeded_router().await;
    seed(&store, "gratis", 0.50, 0.0).await;
    cache.refresh().await.unwrap();

    // Excluded from the ranked listing.
    let snapshot = cache.current();
    assert!(snapshot
        .overall
        .entries
        .iter()
        .all(|e| e.model_id() != "gratis"));
    assert_eq!(snapshot.overall.free_tier.len(), 1);

    // Still selectable when it meets the filters, free cost winning the
    // minimal-cost comparison.
    let decision = router.select(&RouteQuery::new(0.40)).unwrap();
    assert_eq!(decision.selected_model_id, "gratis");
    assert_eq!(decision.expected_cost, 0.0);
    assert_eq!(decision.intelligence_per_dollar, None);
    assert!(!decision.is_value_king);
    assert!(decision.reasoning.contains("free tier"));

    // And rejected like any other candidate when it does not.
    let decision = router.select(&RouteQuery::new(0.85)).unwrap();
    assert_eq!(decision.selected_model_id, "M1");
    assert!(matches!(
        decision.rejected["gratis"],
        RejectionReason::QualityBelowThreshold { .. }
    ));
}

#[tokio::test]
async fn test_category_scoped_selection() {
    let store = Arc::new(MemoryMetricsStore::new());
    seed(&store, "generalist", 0.90, 0.02).await;
    let summarizer =
        PerformanceRecord::new("summarizer", "summarization", 0.92, 0.004, 300.0, 70.0).unwrap();
    store.record(&summarizer).await.unwrap();

    let cache = Arc::new(FrontierCache::new(store));
    cache.refresh().await.unwrap();
    let router = ValueRouter::new(cache);

    let scoped = RouteQuery::new(0.85).with_category("summarization");
    let decision = router.select(&scoped).unwrap();
    assert_eq!(decision.selected_model_id, "summarizer");
    assert_eq!(decision.candidates_considered.len(), 1);

    // Unknown category falls back to the all-categories view and says so.
    let unknown = RouteQuery::new(0.85).with_category("legal");
    let decision = router.select(&unknown).unwrap();
    assert_eq!(decision.candidates_considered.len(), 2);
    assert!(decision.reasoning.contains("No benchmark data for category 'legal'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_selects_stay_consistent_during_refreshes() {
    let (store, cache, router) = seeded_router().await;

    let mut readers = Vec::new();
    for _ in 0..4 {
        let router = router.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let decision = router.select(&RouteQuery::new(0.85)).unwrap();
                // Whatever snapshot a call observed, it was complete and the
                // selection honored the threshold.
                assert!(decision.expected_quality >= 0.85);
                assert!(!decision.candidates_considered.is_empty());
                tokio::task::yield_now().await;
            }
        }));
    }

    for i in 0..20u32 {
        let quality = 0.86 + f64::from(i) * 0.001;
        let record =
            PerformanceRecord::new("M4", "coding", quality, 0.005, 300.0, 60.0).unwrap();
        store.record(&record).await.unwrap();
        cache.refresh().await.unwrap();
    }

    for reader in readers {
        reader.await.unwrap();
    }
}
