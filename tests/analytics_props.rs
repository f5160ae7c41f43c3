//! Property tests for the aggregation invariants.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

use superstore_insights::analytics::{
    DetailLevel, YearRange, compute_profitability, compute_seasonality, derive_insights,
};
use superstore_insights::model::OrderRecord;

const REGIONS: [&str; 4] = ["East", "West", "Central", "South"];
const CATEGORIES: [&str; 3] = ["Technology", "Furniture", "Office Supplies"];

fn record(year: i32, month: u32, region: &str, category: &str, sales: f64, profit: f64) -> OrderRecord {
    let date = NaiveDate::from_ymd_opt(year, month, 1).expect("valid date");
    OrderRecord {
        order_id: "X".into(),
        order_date: date,
        region: region.into(),
        category: category.into(),
        sub_category: "Misc".into(),
        product_name: "Widget".into(),
        sales,
        profit,
        returned: false,
        salesperson: None,
        year: date.year(),
        month: date.month(),
    }
}

fn arb_record() -> impl Strategy<Value = OrderRecord> {
    (
        2012i32..2018,
        1u32..=12,
        0usize..REGIONS.len(),
        0usize..CATEGORIES.len(),
        0.0f64..10_000.0,
        -5_000.0f64..5_000.0,
    )
        .prop_map(|(year, month, region, category, sales, profit)| {
            record(year, month, REGIONS[region], CATEGORIES[category], sales, profit)
        })
}

fn arb_records() -> impl Strategy<Value = Vec<OrderRecord>> {
    prop::collection::vec(arb_record(), 0..200)
}

fn region_set(names: &[&str]) -> FxHashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

proptest! {
    /// The seasonality totals conserve exactly the sales of the records that
    /// match the filter predicate.
    #[test]
    fn seasonality_conserves_filtered_sales(records in arb_records(), min in 2012i32..2018, span in 0i32..3) {
        let years = YearRange::new(min, min + span).unwrap();
        let regions = region_set(&["East", "Central"]);
        let rows = compute_seasonality(&records, years, &regions);

        let aggregate: f64 = rows.iter().map(|r| r.total_sales).sum();
        let direct: f64 = records
            .iter()
            .filter(|r| years.contains(r.year) && regions.contains(r.region.as_str()))
            .map(|r| r.sales)
            .sum();
        prop_assert!((aggregate - direct).abs() < 1e-6);
    }

    /// Each (year, month) key appears at most once, in ascending order.
    #[test]
    fn seasonality_keys_are_unique_and_ordered(records in arb_records()) {
        let years = YearRange::new(2012, 2017).unwrap();
        let regions = region_set(&REGIONS);
        let rows = compute_seasonality(&records, years, &regions);
        let keys: Vec<(i32, u32)> = rows.iter().map(|r| (r.year, r.month)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(keys, sorted);
    }

    /// Pure function: identical arguments give identical output.
    #[test]
    fn seasonality_is_pure(records in arb_records()) {
        let years = YearRange::new(2013, 2016).unwrap();
        let regions = region_set(&["West", "South"]);
        prop_assert_eq!(
            compute_seasonality(&records, years, &regions),
            compute_seasonality(&records, years, &regions)
        );
    }

    /// A single-year range keeps only that year's records.
    #[test]
    fn seasonality_single_year_boundary(records in arb_records(), year in 2012i32..2018) {
        let rows = compute_seasonality(&records, YearRange::single(year), &region_set(&REGIONS));
        prop_assert!(rows.iter().all(|r| r.year == year));
    }

    /// A region set disjoint from the data yields an empty aggregate.
    #[test]
    fn seasonality_disjoint_regions_empty(records in arb_records()) {
        let rows = compute_seasonality(
            &records,
            YearRange::new(2012, 2017).unwrap(),
            &region_set(&["Oceania"]),
        );
        prop_assert!(rows.is_empty());
    }

    /// The profitability sequence is sorted non-increasing, and re-sorting
    /// it reproduces the sequence exactly (stability/idempotence).
    #[test]
    fn profitability_sorted_and_stable(records in arb_records()) {
        let rows = compute_profitability(&records, DetailLevel::Category);
        prop_assert!(rows.windows(2).all(|w| w[0].total_profit >= w[1].total_profit));
        let mut resorted = rows.clone();
        resorted.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
        prop_assert_eq!(rows, resorted);
    }

    /// Profitability conserves total profit across groups.
    #[test]
    fn profitability_conserves_profit(records in arb_records()) {
        let rows = compute_profitability(&records, DetailLevel::Category);
        let grouped: f64 = rows.iter().map(|r| r.total_profit).sum();
        let direct: f64 = records.iter().map(|r| r.profit).sum();
        prop_assert!((grouped - direct).abs() < 1e-6);
    }

    /// derive_insights is total: it never panics, and extremes exist exactly
    /// when the corresponding aggregate is non-empty.
    #[test]
    fn insights_total_over_domain(records in arb_records()) {
        let season = compute_seasonality(
            &records,
            YearRange::new(2012, 2017).unwrap(),
            &region_set(&REGIONS),
        );
        let breakdown = compute_profitability(&records, DetailLevel::Category);
        let summary = derive_insights(&season, &breakdown);
        prop_assert_eq!(summary.peak.is_some(), !season.is_empty());
        prop_assert_eq!(summary.trough.is_some(), !season.is_empty());
        prop_assert_eq!(summary.top.is_some(), !breakdown.is_empty());
        prop_assert_eq!(summary.bottom.is_some(), !breakdown.is_empty());
        if let (Some(peak), Some(trough)) = (&summary.peak, &summary.trough) {
            prop_assert!(peak.sales_usd >= trough.sales_usd);
        }
        if let (Some(top), Some(bottom)) = (&summary.top, &summary.bottom) {
            prop_assert!(top.profit_usd >= bottom.profit_usd);
        }
    }
}
