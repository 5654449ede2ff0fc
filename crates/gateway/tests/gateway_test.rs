use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use frontier_core::config::ModelPricingEntry;
use frontier_core::traits::MetricsStore;
use frontier_core::types::PerformanceRecord;
use frontier_engine::FrontierCache;
use frontier_gateway::{GatewayConfig, GatewayServer};
use frontier_providers::PricingRegistry;
use frontier_store::MemoryMetricsStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn record(model_id: &str, category: &str, quality: f64, cost: f64) -> PerformanceRecord {
    PerformanceRecord::new(model_id, category, quality, cost, 500.0, 40.0).unwrap()
}

fn pricing_entry(model_id: &str) -> ModelPricingEntry {
    ModelPricingEntry {
        model_id: model_id.to_string(),
        provider: "mock".to_string(),
        input_cost_per_1k: 0.005,
        output_cost_per_1k: 0.015,
        max_context_tokens: 128_000,
    }
}

/// Three priced models: two in coding, one in summarization. The configured
/// pricing floor for a minimal request works out to $0.005.
async fn seeded_app() -> axum::Router {
    let store = Arc::new(MemoryMetricsStore::new());
    store
        .record(&record("model-a", "coding", 0.90, 0.02))
        .await
        .unwrap();
    store
        .record(&record("model-b", "coding", 0.80, 0.01))
        .await
        .unwrap();
    store
        .record(&record("model-c", "summarization", 0.95, 0.05))
        .await
        .unwrap();

    let cache = Arc::new(FrontierCache::new(store));
    cache.refresh().await.unwrap();

    let pricing = Arc::new(PricingRegistry::from_entries(&[
        pricing_entry("model-a"),
        pricing_entry("model-b"),
        pricing_entry("model-c"),
    ]));

    GatewayServer::new(GatewayConfig::default(), cache, pricing).build_router()
}

async fn post_route(app: axum::Router, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/route")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = seeded_app().await;
    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_route_selects_cheapest_meeting_threshold() {
    let app = seeded_app().await;
    let (status, json) = post_route(app, json!({"quality_threshold": 0.85})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_model_id"], "model-a");
    assert_eq!(json["expected_cost"], 0.02);
    assert_eq!(json["is_value_king"], true);
    assert!(json["trace_id"].is_string());
    assert_eq!(
        json["rejected"]["model-b"]["reason"],
        "quality_below_threshold"
    );
}

#[tokio::test]
async fn test_route_rejects_all_with_breakdown() {
    let app = seeded_app().await;
    let (status, json) = post_route(app, json!({"quality_threshold": 0.99})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "NO_ELIGIBLE_MODEL");
    assert!(json["message"].as_str().unwrap().contains("no eligible model"));

    let rejected = json["rejected"].as_object().unwrap();
    assert_eq!(rejected.len(), 3);
    for reason in rejected.values() {
        assert_eq!(reason["reason"], "quality_below_threshold");
    }
}

#[tokio::test]
async fn test_route_invalid_threshold() {
    let app = seeded_app().await;
    let (status, json) = post_route(app, json!({"quality_threshold": 1.5})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_THRESHOLD");
    assert!(json["trace_id"].is_string());
}

#[tokio::test]
async fn test_route_unpayable_max_cost() {
    let app = seeded_app().await;
    let (status, json) = post_route(
        app,
        json!({"quality_threshold": 0.5, "max_cost": 0.001}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNPAYABLE_MAX_COST");
    assert!(json["message"].as_str().unwrap().contains("below the cheapest"));
}

#[tokio::test]
async fn test_route_unknown_category_falls_back() {
    let app = seeded_app().await;
    let (status, json) = post_route(
        app,
        json!({"quality_threshold": 0.85, "category": "legal"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_model_id"], "model-a");
    assert!(json["reasoning"]
        .as_str()
        .unwrap()
        .contains("No benchmark data for category 'legal'"));
}

#[tokio::test]
async fn test_route_threshold_defaults_to_zero() {
    let app = seeded_app().await;
    let (status, json) = post_route(app, json!({"category": "summarization"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_model_id"], "model-c");
    assert_eq!(json["expected_quality"], 0.95);
}

#[tokio::test]
async fn test_route_before_any_refresh_is_unavailable() {
    let store = Arc::new(MemoryMetricsStore::new());
    let cache = Arc::new(FrontierCache::new(store));
    let app = GatewayServer::new(
        GatewayConfig::default(),
        cache,
        Arc::new(PricingRegistry::new()),
    )
    .build_router();

    let (status, json) = post_route(app, json!({"quality_threshold": 0.5})).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "EMPTY_SNAPSHOT");
}

#[tokio::test]
async fn test_frontier_listing_ranked() {
    let app = seeded_app().await;
    let (status, json) = get_json(app, "/v1/frontier").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["category"].is_null());
    assert!(!json["refreshed_at"].is_null());
    assert_eq!(json["record_count"], 3);
    assert_eq!(json["stale"], false);

    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["model_id"], "model-b");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["model_id"], "model-a");
    assert_eq!(entries[2]["model_id"], "model-c");
    assert_eq!(entries[2]["rank"], 3);
}

#[tokio::test]
async fn test_frontier_category_scope_and_unknown_category() {
    let app = seeded_app().await;
    let (status, json) = get_json(app, "/v1/frontier?category=coding").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], "coding");
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["model_id"], "model-b");

    let app = seeded_app().await;
    let (status, json) = get_json(app, "/v1/frontier?category=legal").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NO_DATA_FOR_CATEGORY");
}

#[tokio::test]
async fn test_frontier_free_tier_listed_unranked() {
    let store = Arc::new(MemoryMetricsStore::new());
    store
        .record(&record("model-b", "coding", 0.80, 0.01))
        .await
        .unwrap();
    store
        .record(&record("gratis", "coding", 0.50, 0.0))
        .await
        .unwrap();

    let cache = Arc::new(FrontierCache::new(store));
    cache.refresh().await.unwrap();
    let app = GatewayServer::new(
        GatewayConfig::default(),
        cache,
        Arc::new(PricingRegistry::new()),
    )
    .build_router();

    let (status, json) = get_json(app, "/v1/frontier").await;

    assert_eq!(status, StatusCode::OK);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["model_id"], "model-b");

    let free_tier = json["free_tier"].as_array().unwrap();
    assert_eq!(free_tier.len(), 1);
    assert_eq!(free_tier[0]["model_id"], "gratis");
}

#[tokio::test]
async fn test_refresh_endpoint_reports_stats() {
    let app = seeded_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["records"], 3);
    assert_eq!(json["models"], 3);
    assert_eq!(json["categories"], 2);
}
