//! Quality scoring traits.
//!
//! How scores are produced is opaque to this system: they arrive in [0, 1]
//! from an upstream judge behind this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Scores a model response against its prompt.
#[async_trait]
pub trait QualityJudge: Send + Sync {
    /// Score a response in [0, 1] with a short justification.
    async fn score(&self, prompt: &str, response: &str, category: &str) -> Result<Judgement>;
}

/// One quality judgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgement {
    /// Quality score, clamped to [0, 1].
    pub score: f64,
    /// Why the judge assigned this score.
    pub reasoning: String,
}

impl Judgement {
    /// Build a judgement, clamping the score into [0, 1].
    pub fn new(score: f64, reasoning: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            score,
            reasoning: reasoning.into(),
        }
    }
}
