//! Axum-based HTTP server for the routing gateway.

use axum::{
    extract::{Json, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use frontier_core::{
    types::{FrontierEntry, ModelSummary, RejectionReason, RouteQuery},
    Error, Result,
};
use frontier_engine::{FrontierCache, ValueRouter};
use frontier_providers::{PricingRegistry, FLOOR_INPUT_TOKENS, FLOOR_OUTPUT_TOKENS};
use frontier_telemetry::{track_refresh, track_request, track_route_decision};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Snapshot cache backing every selection and listing.
    pub cache: Arc<FrontierCache>,
    /// Value-based model selector.
    pub router: ValueRouter,
    /// Static pricing, used to reject cost ceilings no model could meet.
    pub pricing: Arc<PricingRegistry>,
    /// Snapshot age past which listings carry a staleness flag.
    pub stale_after: chrono::Duration,
}

use metrics_exporter_prometheus::PrometheusHandle;

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(
        config: GatewayConfig,
        cache: Arc<FrontierCache>,
        pricing: Arc<PricingRegistry>,
    ) -> Self {
        Self {
            config,
            state: Arc::new(AppState {
                router: ValueRouter::new(cache.clone()),
                cache,
                pricing,
                stale_after: chrono::Duration::minutes(15),
            }),
            metrics_handle: None,
        }
    }

    /// Set the staleness window for frontier listings.
    pub fn with_stale_after(mut self, stale_after: chrono::Duration) -> Self {
        Arc::get_mut(&mut self.state).unwrap().stale_after = stale_after;
        self
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/v1/route", post(route_handler))
            .route("/v1/frontier", get(frontier_handler))
            .route("/v1/refresh", post(refresh_handler))
            .with_state(self.state.clone());

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            // The layer only wraps the routes registered above, so scrapes
            // of /metrics itself are not counted.
            router = router
                .layer(middleware::from_fn(track_http_metrics))
                .route("/metrics", get(move || async move { handle.render() }));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// HTTP metrics middleware.
async fn track_http_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    track_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Routing request.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Minimum acceptable mean quality. Defaults to zero, which accepts any
    /// measured model.
    #[serde(default)]
    pub quality_threshold: f64,
    /// Restrict candidates to one task category.
    pub category: Option<String>,
    /// Maximum acceptable mean cost per request in USD.
    pub max_cost: Option<f64>,
}

impl From<RouteRequest> for RouteQuery {
    fn from(request: RouteRequest) -> Self {
        Self {
            quality_threshold: request.quality_threshold,
            category: request.category,
            max_cost: request.max_cost,
        }
    }
}

/// Routing response: the decision plus a trace id for log correlation.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Trace ID for this request.
    pub trace_id: String,
    /// The routing decision, flattened into the response body.
    #[serde(flatten)]
    pub decision: frontier_core::types::RoutingDecision,
}

/// Frontier listing query parameters.
#[derive(Debug, Deserialize)]
pub struct FrontierParams {
    /// Restrict the listing to one category.
    pub category: Option<String>,
}

/// One ranked row in the frontier listing.
#[derive(Debug, Serialize)]
pub struct FrontierEntryResponse {
    /// Model identifier.
    pub model_id: String,
    /// Mean quality per dollar.
    pub intelligence_per_dollar: f64,
    /// Mean per-request cost in USD.
    pub mean_cost: f64,
    /// Mean quality score in [0, 1].
    pub mean_quality: f64,
    /// Mean latency in milliseconds.
    pub mean_latency_ms: f64,
    /// Observations behind the means.
    pub sample_count: usize,
    /// Pareto-efficient under (minimize cost, maximize quality).
    pub is_value_king: bool,
    /// 1 = best value.
    pub rank: usize,
}

impl From<&FrontierEntry> for FrontierEntryResponse {
    fn from(entry: &FrontierEntry) -> Self {
        Self {
            model_id: entry.summary.model_id.clone(),
            intelligence_per_dollar: entry.intelligence_per_dollar,
            mean_cost: entry.summary.mean_cost,
            mean_quality: entry.summary.mean_quality,
            mean_latency_ms: entry.summary.mean_latency_ms,
            sample_count: entry.summary.sample_count,
            is_value_king: entry.is_value_king,
            rank: entry.rank,
        }
    }
}

/// Frontier listing response.
#[derive(Debug, Serialize)]
pub struct FrontierResponse {
    /// Scope of the listing. `None` means all categories.
    pub category: Option<String>,
    /// Ranked entries, best value first.
    pub entries: Vec<FrontierEntryResponse>,
    /// Zero-cost models, routable but unranked.
    pub free_tier: Vec<ModelSummary>,
    /// When the snapshot behind this listing was computed.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Records aggregated into the snapshot.
    pub record_count: usize,
    /// Whether the snapshot is older than the staleness window.
    pub stale: bool,
}

/// Refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Records read from the metrics store.
    pub records: usize,
    /// Models in the refreshed all-categories view.
    pub models: usize,
    /// Category views published.
    pub categories: usize,
    /// Wall time spent aggregating and ranking.
    pub elapsed_ms: u64,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Trace ID.
    pub trace_id: Option<String>,
    /// Per-model rejection reasons, present when no candidate was eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<BTreeMap<String, RejectionReason>>,
}

/// Map an engine error onto an HTTP status and a serializable body.
fn error_response(error: Error, trace_id: Option<String>) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code, rejected) = match &error {
        Error::InvalidThreshold { .. } => (StatusCode::BAD_REQUEST, "INVALID_THRESHOLD", None),
        Error::UnpayableMaxCost { .. } => (StatusCode::BAD_REQUEST, "UNPAYABLE_MAX_COST", None),
        Error::NoEligibleModel { rejected, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "NO_ELIGIBLE_MODEL",
            Some(rejected.clone()),
        ),
        Error::EmptySnapshot => (StatusCode::SERVICE_UNAVAILABLE, "EMPTY_SNAPSHOT", None),
        Error::NoDataForCategory { .. } => (StatusCode::NOT_FOUND, "NO_DATA_FOR_CATEGORY", None),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", None),
    };

    (
        status,
        Json(ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
            trace_id,
            rejected,
        }),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Model selection handler.
async fn route_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RouteRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    let query = RouteQuery::from(payload);

    tracing::info!(
        trace_id = %trace_id,
        quality_threshold = query.quality_threshold,
        category = query.category.as_deref().unwrap_or("<any>"),
        max_cost = ?query.max_cost,
        "Processing route request"
    );

    // Constraint ranges first, then the economic floor against configured
    // pricing, then selection against the published snapshot.
    let decision = query
        .validate()
        .and_then(|()| check_cost_floor(&state.pricing, &query))
        .and_then(|()| state.router.select(&query));

    match decision {
        Ok(decision) => {
            track_route_decision(&decision.selected_model_id, "selected");
            (StatusCode::OK, Json(RouteResponse { trace_id, decision })).into_response()
        }
        Err(error) => {
            track_route_decision("none", "rejected");
            tracing::warn!(trace_id = %trace_id, error = %error, "Routing failed");
            error_response(error, Some(trace_id)).into_response()
        }
    }
}

/// Reject a cost ceiling below what any configured model could charge for
/// even a minimal request. Skipped when no pricing is configured.
fn check_cost_floor(pricing: &PricingRegistry, query: &RouteQuery) -> Result<()> {
    let Some(max_cost) = query.max_cost else {
        return Ok(());
    };
    match pricing.cheapest_floor(FLOOR_INPUT_TOKENS, FLOOR_OUTPUT_TOKENS) {
        Some(floor) if max_cost < floor => Err(Error::UnpayableMaxCost { max_cost, floor }),
        _ => Ok(()),
    }
}

/// Frontier listing handler.
async fn frontier_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FrontierParams>,
) -> Response {
    let snapshot = state.cache.current();

    let view = match snapshot.view_for(params.category.as_deref()) {
        Some(view) => view,
        None => {
            // Listings answer unknown categories directly; only routing
            // recovers by falling back to the all-categories view.
            let error = Error::NoDataForCategory {
                category: params.category.clone().unwrap_or_default(),
            };
            return error_response(error, None).into_response();
        }
    };

    let entries: Vec<FrontierEntryResponse> =
        view.entries.iter().map(FrontierEntryResponse::from).collect();

    (
        StatusCode::OK,
        Json(FrontierResponse {
            category: params.category,
            entries,
            free_tier: view.free_tier.clone(),
            refreshed_at: snapshot.refreshed_at,
            record_count: snapshot.record_count,
            stale: state.cache.is_stale(state.stale_after),
        }),
    )
        .into_response()
}

/// Manual refresh handler.
async fn refresh_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.cache.refresh().await {
        Ok(stats) => {
            track_refresh(stats.records, stats.elapsed_ms);
            (
                StatusCode::OK,
                Json(RefreshResponse {
                    records: stats.records,
                    models: stats.models,
                    categories: stats.categories,
                    elapsed_ms: stats.elapsed_ms,
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "Manual refresh failed");
            error_response(error, None).into_response()
        }
    }
}
