//! Pareto frontier computation and intelligence-per-dollar ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;

use frontier_core::types::{
    FrontierEntry, FrontierSnapshot, FrontierView, ModelSummary, PerformanceRecord,
};

use crate::aggregate;

/// Whether `challenger` dominates `target` under (minimize cost, maximize
/// quality): at least as good on both axes and strictly better on one.
///
/// Irreflexive and asymmetric. Two models with identical cost and quality do
/// not dominate each other.
pub fn dominates(challenger: &ModelSummary, target: &ModelSummary) -> bool {
    challenger.mean_cost <= target.mean_cost
        && challenger.mean_quality >= target.mean_quality
        && (challenger.mean_cost < target.mean_cost
            || challenger.mean_quality > target.mean_quality)
}

/// Rank one scope's summaries into a frontier view.
///
/// Zero-cost summaries go to the free tier instead of the ranking; their
/// efficiency ratio is undefined and must never surface as NaN or infinity.
/// Models with fewer than `min_samples` observations are left out entirely.
///
/// The output is fully deterministic: descending intelligence-per-dollar,
/// ties by ascending mean cost, then ascending model id. Input map iteration
/// order never leaks into the result.
pub fn build_view(summaries: HashMap<String, ModelSummary>, min_samples: usize) -> FrontierView {
    let mut priced: Vec<(f64, ModelSummary)> = Vec::new();
    let mut free_tier: Vec<ModelSummary> = Vec::new();

    for (_, summary) in summaries {
        if summary.sample_count < min_samples {
            continue;
        }
        match summary.intelligence_per_dollar() {
            Some(ratio) => priced.push((ratio, summary)),
            None => free_tier.push(summary),
        }
    }

    priced.sort_by(|(ratio_a, a), (ratio_b, b)| {
        ratio_b
            .partial_cmp(ratio_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.mean_cost
                    .partial_cmp(&b.mean_cost)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.model_id.cmp(&b.model_id))
    });

    // Pairwise dominance over the priced set. n stays small (one summary per
    // model), so the quadratic scan is fine.
    let kings: Vec<bool> = priced
        .iter()
        .map(|(_, candidate)| {
            !priced.iter().any(|(_, other)| {
                other.model_id != candidate.model_id && dominates(other, candidate)
            })
        })
        .collect();

    let entries = priced
        .into_iter()
        .zip(kings)
        .enumerate()
        .map(|(i, ((ratio, summary), is_value_king))| FrontierEntry {
            summary,
            intelligence_per_dollar: ratio,
            is_value_king,
            rank: i + 1,
        })
        .collect();

    free_tier.sort_by(|a, b| a.model_id.cmp(&b.model_id));

    FrontierView { entries, free_tier }
}

/// Aggregate raw records into a complete snapshot: the all-categories view
/// plus one view per observed category.
///
/// A category whose view ends up empty (every model under the sample floor)
/// is not published; the router treats it like a category with no data.
pub fn build_snapshot(records: &[PerformanceRecord], min_samples: usize) -> FrontierSnapshot {
    let overall = build_view(aggregate::summarize(records), min_samples);

    let by_category = aggregate::observed_categories(records)
        .into_iter()
        .map(|category| {
            let view = build_view(aggregate::summarize_category(records, &category), min_samples);
            (category, view)
        })
        .filter(|(_, view)| !view.is_empty())
        .collect();

    FrontierSnapshot {
        overall,
        by_category,
        refreshed_at: Some(Utc::now()),
        record_count: records.len(),
    }
}
