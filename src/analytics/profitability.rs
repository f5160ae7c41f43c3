//! Profitability aggregation: profit totals by taxonomy level, highest first.

use rustc_hash::FxHashMap;

use super::types::{DetailLevel, ProfitRow};
use crate::model::OrderRecord;

/// Group the entire record set by the chosen level's value, sum profit per
/// group, and sort descending by that sum.
///
/// The whole dataset is aggregated on purpose: the year/region filters apply
/// to the seasonality view only. The absence of a filter parameter here
/// keeps that visible in the signature.
///
/// The sort is stable, so groups with equal profit keep their
/// first-encountered dataset order.
pub fn compute_profitability(records: &[OrderRecord], level: DetailLevel) -> Vec<ProfitRow> {
    let mut totals: FxHashMap<&str, f64> = FxHashMap::default();
    let mut encounter_order: Vec<&str> = Vec::new();
    for record in records {
        let label = level.label_of(record);
        if !totals.contains_key(label) {
            encounter_order.push(label);
        }
        *totals.entry(label).or_insert(0.0) += record.profit;
    }

    let mut rows: Vec<ProfitRow> = encounter_order
        .into_iter()
        .map(|label| ProfitRow {
            label: label.to_string(),
            total_profit: totals[label],
        })
        .collect();
    rows.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
    rows
}
