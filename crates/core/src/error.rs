//! Error types for ValueFrontier.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::RejectionReason;

/// Result type alias using ValueFrontier's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ValueFrontier.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Routing Errors (engine)
    // =========================================================================
    /// A category was requested that has zero observations. The router
    /// recovers by falling back to the all-categories frontier; the frontier
    /// listing surfaces it directly.
    #[error("no performance data for category '{category}'")]
    NoDataForCategory { category: String },

    /// Every considered candidate failed the quality or cost filter. Carries
    /// the full per-model breakdown so callers can see exactly why.
    #[error("no eligible model: {} candidate(s) rejected (quality_threshold={quality_threshold}, max_cost={max_cost:?})", .rejected.len())]
    NoEligibleModel {
        quality_threshold: f64,
        max_cost: Option<f64>,
        rejected: BTreeMap<String, RejectionReason>,
    },

    /// A ranked frontier entry was requested for a model whose mean cost is
    /// zero. Zero-cost models belong in the free tier, never in the ranking.
    #[error("intelligence-per-dollar is undefined for '{model_id}' (mean cost is zero)")]
    UndefinedEfficiencyRatio { model_id: String },

    /// Selection was attempted before any performance data was aggregated.
    #[error("frontier snapshot is empty: no performance data has been aggregated yet")]
    EmptySnapshot,

    /// Quality threshold outside the valid [0, 1] range.
    #[error("quality threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f64 },

    /// A max_cost constraint below what any configured model could ever meet.
    #[error("max_cost ${max_cost} is below the cheapest configured request cost ${floor}")]
    UnpayableMaxCost { max_cost: f64, floor: f64 },

    // =========================================================================
    // Record Errors
    // =========================================================================
    #[error("invalid performance record: {0}")]
    InvalidRecord(String),

    // =========================================================================
    // Store Errors
    // =========================================================================
    #[error("metrics store error: {0}")]
    Store(String),

    #[error("benchmark run not found: {0}")]
    RunNotFound(String),

    // =========================================================================
    // Provider Errors
    // =========================================================================
    #[error("provider error: {0}")]
    Provider(String),

    // =========================================================================
    // Gateway Errors
    // =========================================================================
    #[error("gateway error: {0}")]
    Gateway(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
