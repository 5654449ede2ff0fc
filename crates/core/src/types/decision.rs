//! Routing queries, decisions, and rejection reasons.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::summary::ModelSummary;

/// A routing request: the constraints a caller places on model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Minimum acceptable mean quality, in [0, 1].
    pub quality_threshold: f64,
    /// Restrict candidates to one task category.
    pub category: Option<String>,
    /// Maximum acceptable mean cost per request in USD.
    pub max_cost: Option<f64>,
}

impl RouteQuery {
    /// Query with only a quality threshold.
    pub fn new(quality_threshold: f64) -> Self {
        Self {
            quality_threshold,
            category: None,
            max_cost: None,
        }
    }

    /// Restrict to a task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a cost ceiling.
    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Check constraint ranges before selection.
    pub fn validate(&self) -> Result<()> {
        if !self.quality_threshold.is_finite() || !(0.0..=1.0).contains(&self.quality_threshold) {
            return Err(Error::InvalidThreshold {
                value: self.quality_threshold,
            });
        }
        if let Some(max_cost) = self.max_cost {
            // A negative ceiling is below any cost floor, including zero.
            if !max_cost.is_finite() || max_cost < 0.0 {
                return Err(Error::UnpayableMaxCost {
                    max_cost,
                    floor: 0.0,
                });
            }
        }
        Ok(())
    }
}

/// Why a considered candidate was not selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Mean quality is under the caller's threshold.
    QualityBelowThreshold { observed: f64, threshold: f64 },
    /// Mean cost is over the caller's ceiling.
    CostAboveLimit { observed: f64, limit: f64 },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QualityBelowThreshold { observed, threshold } => {
                write!(f, "quality below threshold ({:.2} < {:.2})", observed, threshold)
            }
            Self::CostAboveLimit { observed, limit } => {
                write!(f, "cost exceeds max_cost (${:.4} > ${:.4})", observed, limit)
            }
        }
    }
}

/// The outcome of one routing call.
///
/// Constructed fresh per request and returned to the caller; never retained
/// as engine state (it may be logged).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// The model the request should be sent to.
    pub selected_model_id: String,
    /// Human-readable justification, including any category fallback.
    pub reasoning: String,
    /// Mean quality of the selected model.
    pub expected_quality: f64,
    /// Mean per-request cost of the selected model in USD.
    pub expected_cost: f64,
    /// Mean latency of the selected model in milliseconds.
    pub expected_latency_ms: f64,
    /// Efficiency ratio of the selected model. `None` for free-tier picks.
    pub intelligence_per_dollar: Option<f64>,
    /// Whether the selected model is Pareto-efficient.
    pub is_value_king: bool,
    /// Every candidate that was considered, in consideration order.
    pub candidates_considered: Vec<ModelSummary>,
    /// Candidates that failed a constraint, with the specific unmet one.
    pub rejected: BTreeMap<String, RejectionReason>,
}
