//! Provider text-generation traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A provider capable of generating text for a prompt.
///
/// The single generation contract every provider implementation satisfies;
/// nothing downstream depends on provider-specific types.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Generation>;
}

/// One completed generation with usage as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text.
    pub text: String,
    /// Input tokens as reported by the provider.
    pub input_tokens: u64,
    /// Output tokens as reported by the provider.
    pub output_tokens: u64,
    /// End-to-end latency in milliseconds.
    pub latency_ms: f64,
}

impl Generation {
    /// Output throughput in tokens per second. Zero for non-positive latency.
    pub fn tokens_per_second(&self) -> f64 {
        if self.latency_ms > 0.0 {
            self.output_tokens as f64 / (self.latency_ms / 1000.0)
        } else {
            0.0
        }
    }
}
