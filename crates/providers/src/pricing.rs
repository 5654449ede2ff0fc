//! Static per-1k-token pricing, injected from configuration.
//!
//! The engine never fetches pricing; it only consults this registry to check
//! that a caller's cost ceiling is economically meaningful at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use frontier_core::config::ModelPricingEntry;

/// Token counts used when checking whether a cost ceiling could ever be met.
/// Roughly one short prompt and one short answer.
pub const FLOOR_INPUT_TOKENS: u64 = 250;
pub const FLOOR_OUTPUT_TOKENS: u64 = 250;

/// Pricing information for one model (per 1K tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Model identifier (e.g. "openai:gpt-4o-mini").
    pub model_id: String,
    /// Provider the model belongs to.
    pub provider: String,
    /// Cost per 1K input tokens in USD.
    pub input_cost_per_1k: f64,
    /// Cost per 1K output tokens in USD.
    pub output_cost_per_1k: f64,
    /// Maximum context window in tokens.
    pub max_context_tokens: u32,
}

impl ModelPricing {
    pub fn new(
        model_id: impl Into<String>,
        provider: impl Into<String>,
        input: f64,
        output: f64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            provider: provider.into(),
            input_cost_per_1k: input,
            output_cost_per_1k: output,
            max_context_tokens: 128_000,
        }
    }

    /// Set the context window size.
    pub fn with_context_tokens(mut self, max_context_tokens: u32) -> Self {
        self.max_context_tokens = max_context_tokens;
        self
    }

    /// Cost of one request in USD.
    pub fn cost_of(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_cost = (input_tokens as f64 / 1000.0) * self.input_cost_per_1k;
        let output_cost = (output_tokens as f64 / 1000.0) * self.output_cost_per_1k;
        input_cost + output_cost
    }
}

impl From<&ModelPricingEntry> for ModelPricing {
    fn from(entry: &ModelPricingEntry) -> Self {
        Self {
            model_id: entry.model_id.clone(),
            provider: entry.provider.clone(),
            input_cost_per_1k: entry.input_cost_per_1k,
            output_cost_per_1k: entry.output_cost_per_1k,
            max_context_tokens: entry.max_context_tokens,
        }
    }
}

/// Registry of model pricing, keyed by model id.
#[derive(Debug, Default)]
pub struct PricingRegistry {
    models: HashMap<String, ModelPricing>,
}

impl PricingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration entries.
    pub fn from_entries(entries: &[ModelPricingEntry]) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(ModelPricing::from(entry));
        }
        registry
    }

    /// Register (or replace) a model's pricing.
    pub fn register(&mut self, pricing: ModelPricing) {
        self.models.insert(pricing.model_id.clone(), pricing);
    }

    /// Pricing for a model, if configured.
    pub fn get(&self, model_id: &str) -> Option<&ModelPricing> {
        self.models.get(model_id)
    }

    /// All configured model ids, sorted.
    pub fn model_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.models.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// All models sorted by combined per-1k rate, cheapest first.
    pub fn sorted_by_cost(&self) -> Vec<&ModelPricing> {
        let mut models: Vec<&ModelPricing> = self.models.values().collect();
        models.sort_by(|a, b| {
            let rate_a = a.input_cost_per_1k + a.output_cost_per_1k;
            let rate_b = b.input_cost_per_1k + b.output_cost_per_1k;
            rate_a
                .partial_cmp(&rate_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.model_id.cmp(&b.model_id))
        });
        models
    }

    /// The cheapest possible request cost across all configured models, for
    /// the given token shape. `None` when no pricing is configured.
    ///
    /// A caller's `max_cost` below this floor can never be satisfied, so the
    /// gateway rejects it before selection runs.
    pub fn cheapest_floor(&self, input_tokens: u64, output_tokens: u64) -> Option<f64> {
        self.models
            .values()
            .map(|pricing| pricing.cost_of(input_tokens, output_tokens))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}
