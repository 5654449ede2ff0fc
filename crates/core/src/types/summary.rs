//! Per-model aggregated statistics.

use serde::{Deserialize, Serialize};

/// Aggregated statistics for one model within a category scope (or across
/// all categories).
///
/// Derived entity: recomputed deterministically from performance records on
/// every refresh and replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model identifier.
    pub model_id: String,
    /// Arithmetic mean of quality scores, in [0, 1].
    pub mean_quality: f64,
    /// Arithmetic mean of per-request cost in USD.
    pub mean_cost: f64,
    /// Arithmetic mean of latency in milliseconds.
    pub mean_latency_ms: f64,
    /// Arithmetic mean of throughput in tokens per second.
    pub mean_tokens_per_second: f64,
    /// Number of records behind the means.
    pub sample_count: usize,
}

impl ModelSummary {
    /// The primary efficiency metric: mean quality per dollar of mean cost.
    ///
    /// Returns `None` when mean cost is zero: the ratio is undefined there
    /// and such models are bucketed as free tier instead of being ranked.
    /// Never produces NaN or infinity.
    pub fn intelligence_per_dollar(&self) -> Option<f64> {
        if self.mean_cost > 0.0 {
            Some(self.mean_quality / self.mean_cost)
        } else {
            None
        }
    }

    /// Whether this model sits in the free tier (zero mean cost).
    pub fn is_free(&self) -> bool {
        self.mean_cost == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(model_id: &str, mean_quality: f64, mean_cost: f64) -> ModelSummary {
        ModelSummary {
            model_id: model_id.to_string(),
            mean_quality,
            mean_cost,
            mean_latency_ms: 500.0,
            mean_tokens_per_second: 40.0,
            sample_count: 3,
        }
    }

    #[test]
    fn test_intelligence_per_dollar() {
        let s = summary("m1", 0.9, 0.02);
        let ipd = s.intelligence_per_dollar().unwrap();
        assert!((ipd - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_ratio_is_undefined() {
        let s = summary("free", 0.5, 0.0);
        assert!(s.intelligence_per_dollar().is_none());
        assert!(s.is_free());
    }
}
