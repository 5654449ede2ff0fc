//! Tracing subscriber configuration.

use frontier_core::{Error, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Configure stdout logging with an env-driven filter.
///
/// `RUST_LOG` overrides the default filter, which logs the routing and
/// gateway crates at debug and everything else at info. When `json_logs`
/// is set, events are emitted as one JSON object per line.
pub fn configure_tracing(json_logs: bool) -> Result<()> {
    // Basic EnvFilter
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,frontier_engine=debug,frontier_gateway=debug".into()),
    );

    // Registry with filter; the fmt layer depends on the output format
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| Error::config(format!("Failed to set tracing subscriber: {}", e)))?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| Error::config(format!("Failed to set tracing subscriber: {}", e)))?;
    }

    Ok(())
}
