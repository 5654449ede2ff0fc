#![deny(unused)]
//! ValueFrontier - Value Routing and Efficiency Frontier Engine
//!
//! Benchmarks configured models on cost, quality, and latency, ranks them
//! by intelligence per dollar, and routes each request to the cheapest
//! model that meets the caller's constraints.

use std::collections::BTreeMap;
use std::sync::Arc;

use frontier_bench::{BenchmarkOrchestrator, GeneratorJudge, ScriptedJudge, BUILTIN_PROMPTS};
use frontier_core::config::AppConfig;
use frontier_core::traits::{MetricsStore, QualityJudge};
use frontier_core::Error;
use frontier_engine::{spawn_refresh_loop, FrontierCache};
use frontier_gateway::{GatewayConfig, GatewayServer};
use frontier_providers::{
    HttpGenerator, MockGenerator, PricingRegistry, ProviderRegistry,
};
use frontier_store::{MemoryMetricsStore, SqliteMetricsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("No usable configuration ({}), falling back to built-in defaults", e);
            AppConfig::default()
        }
    };

    // Initialize tracing
    frontier_telemetry::configure_tracing(config.telemetry.json_logs)?;

    tracing::info!("Starting ValueFrontier v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Initialize metrics store
    // =========================================================================
    let store: Arc<dyn MetricsStore> = match &config.store.sqlite_path {
        Some(path) => {
            tracing::info!(path = %path, "Initializing SQLite metrics store");
            Arc::new(SqliteMetricsStore::new(path)?)
        }
        None => {
            tracing::info!("Initializing in-memory metrics store");
            Arc::new(MemoryMetricsStore::new())
        }
    };

    // =========================================================================
    // Initialize providers & pricing
    // =========================================================================
    let pricing = Arc::new(PricingRegistry::from_entries(&config.models));
    let providers = Arc::new(ProviderRegistry::new());

    for (i, entry) in config.models.iter().enumerate() {
        if config.bench.use_mock_providers {
            // Spread simulated latencies so the listings have texture.
            let generator =
                MockGenerator::new(entry.model_id.as_str()).with_latency(150.0 + 60.0 * i as f64);
            providers.register(entry.model_id.as_str(), Arc::new(generator));
            continue;
        }

        let settings = config.providers.get(&entry.provider);
        if let Some(settings) = settings {
            if !settings.enabled {
                tracing::warn!(
                    model_id = %entry.model_id,
                    provider = %entry.provider,
                    "Provider disabled, model will not be registered"
                );
                continue;
            }
        }

        let mut generator = HttpGenerator::new(entry.model_id.as_str());
        if let Some(settings) = settings {
            if let Some(api_base) = &settings.api_base {
                generator = generator.with_api_base(api_base.as_str());
            }
            if let Some(api_key) = &settings.api_key {
                generator = generator.with_api_key(api_key.clone());
            }
        }
        providers.register(entry.model_id.as_str(), Arc::new(generator));
    }

    tracing::info!(
        models = providers.len(),
        priced = pricing.len(),
        mock = config.bench.use_mock_providers,
        "Provider registry initialized"
    );

    // =========================================================================
    // Initialize frontier engine
    // =========================================================================
    let cache = Arc::new(
        FrontierCache::new(store.clone()).with_min_samples(config.engine.min_samples as usize),
    );

    // =========================================================================
    // Startup benchmark sweep
    // =========================================================================
    if config.bench.run_on_start {
        let roster = providers.model_ids();
        if roster.is_empty() {
            tracing::warn!("bench.run_on_start is set but no providers are registered, skipping");
        } else {
            let judge: Arc<dyn QualityJudge> = if config.bench.use_mock_providers {
                // Scripted demo scores: quality rises with price, with
                // diminishing returns, so the ranking has a visible shape.
                let mut scores = BTreeMap::new();
                let mut score = 0.70f64;
                for model in pricing.sorted_by_cost() {
                    scores.insert(format!("[{}]", model.model_id), score);
                    score += (0.97 - score) * 0.4;
                }
                Arc::new(ScriptedJudge::keyed(scores, 0.5))
            } else {
                let judge_model = config.bench.judge_model.as_deref().ok_or_else(|| {
                    Error::config("bench.judge_model is required when use_mock_providers is false")
                })?;
                let judge_generator = providers.get(judge_model).ok_or_else(|| {
                    Error::config(format!(
                        "judge model '{}' is not a registered provider",
                        judge_model
                    ))
                })?;
                Arc::new(GeneratorJudge::new(judge_generator))
            };

            let orchestrator = BenchmarkOrchestrator::new(
                store.clone(),
                providers.clone(),
                pricing.clone(),
                judge,
            )
            .with_max_tokens(config.bench.max_tokens);

            let report = orchestrator.run(&roster, BUILTIN_PROMPTS).await?;
            tracing::info!(
                run_id = %report.run_id,
                recorded = report.recorded,
                failures = report.failures,
                "Startup benchmark sweep complete"
            );
        }
    }

    // Publish the first snapshot before accepting traffic.
    cache.refresh().await?;

    if config.engine.refresh_interval_secs > 0 {
        let _refresh_task = spawn_refresh_loop(
            cache.clone(),
            std::time::Duration::from_secs(config.engine.refresh_interval_secs),
        );
        tracing::info!(
            interval_secs = config.engine.refresh_interval_secs,
            "Background refresh loop started"
        );
    }

    // =========================================================================
    // Initialize observability
    // =========================================================================
    let metrics_handle = frontier_telemetry::setup_metrics_recorder()?;

    // =========================================================================
    // Initialize gateway
    // =========================================================================
    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: config.server.enable_cors,
        enable_tracing: true,
    };

    let server = GatewayServer::new(gateway_config.clone(), cache.clone(), pricing.clone())
        .with_stale_after(chrono::Duration::seconds(config.engine.stale_after_secs as i64))
        .with_metrics(metrics_handle);

    tracing::info!(
        host = %gateway_config.host,
        port = gateway_config.port,
        "Gateway initialized"
    );

    // =========================================================================
    // Print startup banner
    // =========================================================================
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                   ValueFrontier v{}                       ║", env!("CARGO_PKG_VERSION"));
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Intelligence-per-dollar routing for LLM fleets              ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Endpoints:                                                  ║");
    println!("║    GET  /health       - Health check                         ║");
    println!("║    POST /v1/route     - Select the best-value model          ║");
    println!("║    GET  /v1/frontier  - Efficiency frontier rankings         ║");
    println!("║    POST /v1/refresh   - Rebuild the frontier snapshot        ║");
    println!("║    GET  /metrics      - Prometheus metrics                   ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Server: http://{}:{}                              ║", gateway_config.host, gateway_config.port);
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // =========================================================================
    // Start the server
    // =========================================================================
    server.run().await?;

    Ok(())
}
