//! Reduction of raw performance records into per-model summary statistics.

use std::collections::{BTreeSet, HashMap};

use frontier_core::types::{ModelSummary, PerformanceRecord};

/// Running sums for one model's record group.
#[derive(Debug, Default)]
struct Accumulator {
    quality: f64,
    cost: f64,
    latency: f64,
    throughput: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, record: &PerformanceRecord) {
        self.quality += record.quality_score;
        self.cost += record.cost_usd;
        self.latency += record.latency_ms;
        self.throughput += record.tokens_per_second;
        self.count += 1;
    }

    /// Arithmetic means of the group. `count` is at least one by
    /// construction, since a group only exists after its first `add`.
    fn finish(self, model_id: String) -> ModelSummary {
        let n = self.count as f64;
        ModelSummary {
            model_id,
            mean_quality: self.quality / n,
            mean_cost: self.cost / n,
            mean_latency_ms: self.latency / n,
            mean_tokens_per_second: self.throughput / n,
            sample_count: self.count,
        }
    }
}

/// Group records by model and compute arithmetic means per group.
///
/// A model with zero matching records is absent from the output, never
/// synthesized with zero values. Absence means "no data", which callers must
/// keep distinct from "zero cost". An empty input yields an empty map.
pub fn summarize<'a, I>(records: I) -> HashMap<String, ModelSummary>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let mut groups: HashMap<String, Accumulator> = HashMap::new();
    for record in records {
        groups
            .entry(record.model_id.clone())
            .or_default()
            .add(record);
    }

    groups
        .into_iter()
        .map(|(model_id, acc)| {
            let summary = acc.finish(model_id);
            (summary.model_id.clone(), summary)
        })
        .collect()
}

/// Summaries for the records of a single category.
pub fn summarize_category<'a, I>(records: I, category: &str) -> HashMap<String, ModelSummary>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    summarize(records.into_iter().filter(|r| r.category == category))
}

/// Distinct categories present in the input, in sorted order.
pub fn observed_categories<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    records.into_iter().map(|r| r.category.clone()).collect()
}
