//! Seasonality aggregation: sales/profit totals bucketed by (year, month).

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use super::types::{SeasonalityRow, YearRange};
use crate::model::OrderRecord;

/// Keep the records whose year falls within `years` and whose region is in
/// `regions`, group them by (year, month), and sum sales and profit per
/// bucket.
///
/// The result is ordered by year, then month. Every (year, month)
/// combination present in the filtered input appears exactly once;
/// combinations absent from the input are omitted, never zero-filled. An
/// empty filtered set yields an empty vec — "no data", not an error.
pub fn compute_seasonality(
    records: &[OrderRecord],
    years: YearRange,
    regions: &FxHashSet<String>,
) -> Vec<SeasonalityRow> {
    let mut buckets: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for record in records {
        if !years.contains(record.year) || !regions.contains(record.region.as_str()) {
            continue;
        }
        let bucket = buckets.entry((record.year, record.month)).or_insert((0.0, 0.0));
        bucket.0 += record.sales;
        bucket.1 += record.profit;
    }
    buckets
        .into_iter()
        .map(|((year, month), (total_sales, total_profit))| SeasonalityRow {
            year,
            month,
            total_sales,
            total_profit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn record(year: i32, month: u32, region: &str, sales: f64) -> OrderRecord {
        let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        OrderRecord {
            order_id: "US-1".into(),
            order_date: date,
            region: region.into(),
            category: "Technology".into(),
            sub_category: "Phones".into(),
            product_name: "Alpha Phone".into(),
            sales,
            profit: 0.0,
            returned: false,
            salesperson: None,
            year: date.year(),
            month: date.month(),
        }
    }

    fn regions(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_and_sums_by_year_month() {
        let records = vec![
            record(2015, 1, "East", 100.0),
            record(2015, 1, "West", 50.0),
            record(2016, 2, "East", 200.0),
        ];
        let rows = compute_seasonality(
            &records,
            YearRange::new(2015, 2016).unwrap(),
            &regions(&["East", "West"]),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2015);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[0].total_sales, 150.0);
        assert_eq!(rows[1].year, 2016);
        assert_eq!(rows[1].month, 2);
        assert_eq!(rows[1].total_sales, 200.0);
    }

    #[test]
    fn output_is_ordered_by_year_then_month() {
        let records = vec![
            record(2016, 1, "East", 1.0),
            record(2015, 12, "East", 1.0),
            record(2015, 3, "East", 1.0),
        ];
        let rows = compute_seasonality(
            &records,
            YearRange::new(2015, 2016).unwrap(),
            &regions(&["East"]),
        );
        let keys: Vec<(i32, u32)> = rows.iter().map(|r| (r.year, r.month)).collect();
        assert_eq!(keys, vec![(2015, 3), (2015, 12), (2016, 1)]);
    }

    #[test]
    fn single_year_boundary() {
        let records = vec![
            record(2014, 6, "East", 10.0),
            record(2015, 6, "East", 20.0),
            record(2016, 6, "East", 30.0),
        ];
        let rows = compute_seasonality(&records, YearRange::single(2015), &regions(&["East"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2015);
        assert_eq!(rows[0].total_sales, 20.0);
    }

    #[test]
    fn disjoint_region_set_yields_empty() {
        let records = vec![record(2015, 1, "East", 100.0)];
        let rows = compute_seasonality(
            &records,
            YearRange::single(2015),
            &regions(&["Oceania"]),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_input_yields_empty() {
        let rows = compute_seasonality(&[], YearRange::single(2015), &regions(&["East"]));
        assert!(rows.is_empty());
    }

    #[test]
    fn identical_arguments_give_identical_output() {
        let records = vec![
            record(2015, 1, "East", 100.0),
            record(2015, 2, "West", 60.0),
        ];
        let years = YearRange::new(2015, 2015).unwrap();
        let set = regions(&["East", "West"]);
        assert_eq!(
            compute_seasonality(&records, years, &set),
            compute_seasonality(&records, years, &set)
        );
    }

    #[test]
    fn profit_is_summed_alongside_sales() {
        let mut a = record(2015, 1, "East", 100.0);
        a.profit = 30.0;
        let mut b = record(2015, 1, "East", 50.0);
        b.profit = -10.0;
        let rows = compute_seasonality(
            &[a, b],
            YearRange::single(2015),
            &regions(&["East"]),
        );
        assert_eq!(rows[0].total_sales, 150.0);
        assert_eq!(rows[0].total_profit, 20.0);
    }
}
