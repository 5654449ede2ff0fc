//! Layered application configuration.
//!
//! Sources, later ones overriding earlier: `config/default`, the
//! `FRONTIER_ENV` profile, `config/local`, then `APP__`-prefixed environment
//! variables (`APP__SERVER__PORT=9000`). Secrets like API keys should only
//! arrive through the environment.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub store: StoreConfig,
    pub bench: BenchConfig,
    pub telemetry: TelemetryConfig,
    pub providers: HashMap<String, ProviderSettings>,
    pub models: Vec<ModelPricingEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Models with fewer samples than this are hidden from frontier views.
    pub min_samples: u32,
    /// Background refresh cadence. Zero disables the background task.
    pub refresh_interval_secs: u64,
    /// Snapshot age past which staleness warnings are emitted.
    pub stale_after_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// SQLite database path. `None` selects the in-memory store.
    pub sqlite_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BenchConfig {
    /// Run one benchmark sweep at startup to seed the store.
    pub run_on_start: bool,
    /// Register scripted mock generators instead of HTTP clients.
    pub use_mock_providers: bool,
    /// Token cap passed to providers during benchmark generations.
    pub max_tokens: u32,
    /// Model that scores responses when mock providers are off. Must name
    /// one of the configured models.
    pub judge_model: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub json_logs: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub enabled: bool,
    /// OpenAI-compatible endpoint override.
    pub api_base: Option<String>,
    pub api_key: Option<Secret<String>>,
}

/// Static pricing registry entry: model identity plus per-1k-token rates.
/// Used to validate cost constraints; the engine never fetches pricing.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelPricingEntry {
    pub model_id: String,
    pub provider: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    pub max_context_tokens: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("FRONTIER_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=8080 to app.server.port
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                enable_cors: true,
            },
            engine: EngineConfig {
                min_samples: 1,
                refresh_interval_secs: 300,
                stale_after_secs: 900,
            },
            store: StoreConfig { sqlite_path: None },
            bench: BenchConfig {
                run_on_start: false,
                use_mock_providers: true,
                max_tokens: 1000,
                judge_model: None,
            },
            telemetry: TelemetryConfig { json_logs: false },
            providers: HashMap::new(),
            models: Vec::new(),
        }
    }
}
