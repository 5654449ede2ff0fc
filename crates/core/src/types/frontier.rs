//! Ranked efficiency views and the published snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::summary::ModelSummary;

/// One ranked position on the efficiency frontier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierEntry {
    /// The aggregated statistics behind this entry.
    pub summary: ModelSummary,
    /// Mean quality per dollar. Always defined for ranked entries.
    pub intelligence_per_dollar: f64,
    /// Pareto-efficient under (minimize cost, maximize quality).
    pub is_value_king: bool,
    /// 1 = highest intelligence-per-dollar. Contiguous within a scope.
    pub rank: usize,
}

impl FrontierEntry {
    /// Build a ranked entry. Fails with `UndefinedEfficiencyRatio` for a
    /// zero-cost summary; those belong in the free tier, not the ranking.
    pub fn new(summary: ModelSummary, rank: usize, is_value_king: bool) -> Result<Self> {
        let intelligence_per_dollar =
            summary
                .intelligence_per_dollar()
                .ok_or_else(|| Error::UndefinedEfficiencyRatio {
                    model_id: summary.model_id.clone(),
                })?;
        Ok(Self {
            summary,
            intelligence_per_dollar,
            is_value_king,
            rank,
        })
    }

    /// Model identifier of this entry.
    pub fn model_id(&self) -> &str {
        &self.summary.model_id
    }
}

/// The frontier for one category scope: ranked priced models plus an
/// unranked free tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontierView {
    /// Ranked entries, descending intelligence-per-dollar.
    pub entries: Vec<FrontierEntry>,
    /// Zero-mean-cost models, excluded from ranking and dominance but still
    /// routable. Sorted by model id.
    pub free_tier: Vec<ModelSummary>,
}

impl FrontierView {
    /// Number of models in the view, free tier included.
    pub fn model_count(&self) -> usize {
        self.entries.len() + self.free_tier.len()
    }

    /// Whether the view holds no models at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.free_tier.is_empty()
    }

    /// Candidates in deterministic consideration order: ranked entries first,
    /// then the free tier. Yields the value-king flag alongside each summary.
    pub fn candidates(&self) -> impl Iterator<Item = (&ModelSummary, bool)> {
        self.entries
            .iter()
            .map(|e| (&e.summary, e.is_value_king))
            .chain(self.free_tier.iter().map(|s| (s, false)))
    }

    /// Value kings of this view.
    pub fn value_kings(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter().filter(|e| e.is_value_king)
    }
}

/// Immutable aggregate of all frontier views, published behind an atomic
/// reference swap. Readers always observe one complete snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontierSnapshot {
    /// All-categories frontier.
    pub overall: FrontierView,
    /// Per-category frontiers, keyed by category name.
    pub by_category: BTreeMap<String, FrontierView>,
    /// When this snapshot was computed. `None` until the first refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Number of records the snapshot was aggregated from.
    pub record_count: usize,
}

impl FrontierSnapshot {
    /// Snapshot with no data, as published before the first refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the view for a scope. `None` category means the all-categories
    /// view; a named category resolves only if it has observations.
    pub fn view_for(&self, category: Option<&str>) -> Option<&FrontierView> {
        match category {
            None => Some(&self.overall),
            Some(name) => self.by_category.get(name),
        }
    }

    /// Whether any model has ever been aggregated into this snapshot.
    pub fn is_empty(&self) -> bool {
        self.overall.is_empty()
    }

    /// Time since the snapshot was computed, if it ever was.
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.refreshed_at.map(|at| now - at)
    }
}
