//! Deterministic value-based model selection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use frontier_core::{
    types::{FrontierSnapshot, ModelSummary, RejectionReason, RouteQuery, RoutingDecision},
    Error, Result,
};

use crate::snapshot::FrontierCache;

/// Routes each request to the cheapest model meeting its constraints.
///
/// Holds no per-call state. Every call reads whatever snapshot the cache
/// currently publishes and runs a pure selection on it, so concurrent calls
/// never contend with each other or with a refresh.
#[derive(Clone)]
pub struct ValueRouter {
    cache: Arc<FrontierCache>,
}

impl ValueRouter {
    pub fn new(cache: Arc<FrontierCache>) -> Self {
        Self { cache }
    }

    /// Select a model for `query` against the current snapshot.
    pub fn select(&self, query: &RouteQuery) -> Result<RoutingDecision> {
        let snapshot = self.cache.current();
        let decision = select_on(&snapshot, query)?;
        tracing::debug!(
            model_id = %decision.selected_model_id,
            expected_cost = decision.expected_cost,
            expected_quality = decision.expected_quality,
            rejected = decision.rejected.len(),
            "routing decision"
        );
        Ok(decision)
    }
}

/// Pure selection of one model from one immutable snapshot.
///
/// Reproducible: identical (snapshot, query) pairs always produce identical
/// decisions, including the reasoning text.
pub fn select_on(snapshot: &FrontierSnapshot, query: &RouteQuery) -> Result<RoutingDecision> {
    query.validate()?;
    if snapshot.is_empty() {
        return Err(Error::EmptySnapshot);
    }

    // Category scope. Falling back to the all-categories view is recovery,
    // not an error, but it must be visible in the reasoning.
    let (view, missing_category) = match query.category.as_deref() {
        None => (&snapshot.overall, None),
        Some(category) => match snapshot.view_for(Some(category)) {
            Some(view) => (view, None),
            None => {
                tracing::warn!(
                    category,
                    "no data for requested category, using the all-category frontier"
                );
                (&snapshot.overall, Some(category))
            }
        },
    };

    let candidates_considered: Vec<ModelSummary> =
        view.candidates().map(|(s, _)| s.clone()).collect();

    let mut eligible: Vec<(&ModelSummary, bool)> = Vec::new();
    let mut rejected: BTreeMap<String, RejectionReason> = BTreeMap::new();

    for (summary, is_value_king) in view.candidates() {
        if summary.mean_quality < query.quality_threshold {
            rejected.insert(
                summary.model_id.clone(),
                RejectionReason::QualityBelowThreshold {
                    observed: summary.mean_quality,
                    threshold: query.quality_threshold,
                },
            );
            continue;
        }
        if let Some(limit) = query.max_cost {
            if summary.mean_cost > limit {
                rejected.insert(
                    summary.model_id.clone(),
                    RejectionReason::CostAboveLimit {
                        observed: summary.mean_cost,
                        limit,
                    },
                );
                continue;
            }
        }
        eligible.push((summary, is_value_king));
    }

    let Some(&(selected, is_value_king)) = eligible.iter().min_by(|a, b| prefer(a, b)) else {
        return Err(Error::NoEligibleModel {
            quality_threshold: query.quality_threshold,
            max_cost: query.max_cost,
            rejected,
        });
    };

    let intelligence_per_dollar = selected.intelligence_per_dollar();
    let reasoning = compose_reasoning(
        selected,
        is_value_king,
        query,
        missing_category,
        rejected.len(),
    );

    Ok(RoutingDecision {
        selected_model_id: selected.model_id.clone(),
        reasoning,
        expected_quality: selected.mean_quality,
        expected_cost: selected.mean_cost,
        expected_latency_ms: selected.mean_latency_ms,
        intelligence_per_dollar,
        is_value_king,
        candidates_considered,
        rejected,
    })
}

/// Candidate preference order: minimal mean cost, then maximal mean quality,
/// then value kings over dominated models, then lexical model id. Total over
/// any candidate set, since model ids are unique within a view.
fn prefer(a: &(&ModelSummary, bool), b: &(&ModelSummary, bool)) -> Ordering {
    let (sa, king_a) = a;
    let (sb, king_b) = b;
    sa.mean_cost
        .partial_cmp(&sb.mean_cost)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            sb.mean_quality
                .partial_cmp(&sa.mean_quality)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| king_b.cmp(king_a))
        .then_with(|| sa.model_id.cmp(&sb.model_id))
}

fn compose_reasoning(
    selected: &ModelSummary,
    is_value_king: bool,
    query: &RouteQuery,
    missing_category: Option<&str>,
    rejected_count: usize,
) -> String {
    let mut reasoning = String::new();
    if let Some(category) = missing_category {
        reasoning.push_str(&format!(
            "No benchmark data for category '{}'; considered the all-category frontier. ",
            category
        ));
    }
    reasoning.push_str(&format!(
        "Selected '{}': cheapest model with mean quality {:.2} >= threshold {:.2} at ${:.4}/request",
        selected.model_id, selected.mean_quality, query.quality_threshold, selected.mean_cost
    ));
    if selected.is_free() {
        reasoning.push_str(" (free tier)");
    } else if is_value_king {
        reasoning.push_str(" (value king: on the efficiency frontier)");
    }
    if rejected_count > 0 {
        reasoning.push_str(&format!("; {} candidate(s) rejected", rejected_count));
    }
    reasoning.push('.');
    reasoning
}
