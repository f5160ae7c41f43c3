//! Insight extraction from the two aggregates.
//!
//! Total over its domain: empty aggregates produce `None` extremes (rendered
//! as the [`NO_DATA`] sentinel), never a panic or an error.

use super::types::{GroupExtreme, InsightSummary, MonthExtreme, ProfitRow, SeasonalityRow};

/// Sentinel text for an empty aggregate.
pub const NO_DATA: &str = "no data";

/// Fixed three-letter month names, 1-indexed by calendar month. No locale
/// lookup.
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter name for a calendar month in 1..=12.
pub fn month_name(month: u32) -> &'static str {
    if (1..=12).contains(&month) {
        MONTH_ABBREV[(month - 1) as usize]
    } else {
        "???"
    }
}

/// Derive the insight summary from the two aggregates.
///
/// Seasonality is re-aggregated per calendar month across all included years
/// (one sum per month, not per (year, month)); the months with the maximum
/// and minimum summed sales become peak and trough. Ties go to the earliest
/// month. USD values are rounded down to whole dollars.
///
/// The first row of the (descending-sorted) profitability aggregate is the
/// top performer and the last row the bottom; with a single group both point
/// at the same row.
pub fn derive_insights(
    seasonality: &[SeasonalityRow],
    profitability: &[ProfitRow],
) -> InsightSummary {
    let mut by_month = [0.0_f64; 12];
    let mut seen = [false; 12];
    for row in seasonality {
        if (1..=12).contains(&row.month) {
            let idx = (row.month - 1) as usize;
            by_month[idx] += row.total_sales;
            seen[idx] = true;
        }
    }

    let mut peak: Option<(u32, f64)> = None;
    let mut trough: Option<(u32, f64)> = None;
    for idx in 0..12 {
        if !seen[idx] {
            continue;
        }
        let month = (idx + 1) as u32;
        let value = by_month[idx];
        // Strict comparisons keep the earliest month on ties.
        if peak.is_none_or(|(_, best)| value > best) {
            peak = Some((month, value));
        }
        if trough.is_none_or(|(_, worst)| value < worst) {
            trough = Some((month, value));
        }
    }

    let month_extreme = |(month, value): (u32, f64)| MonthExtreme {
        month,
        name: month_name(month),
        sales_usd: value.floor() as i64,
    };
    let group_extreme = |row: &ProfitRow| GroupExtreme {
        label: row.label.clone(),
        profit_usd: row.total_profit.floor() as i64,
    };

    InsightSummary {
        peak: peak.map(month_extreme),
        trough: trough.map(month_extreme),
        top: profitability.first().map(group_extreme),
        bottom: profitability.last().map(group_extreme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(year: i32, month: u32, sales: f64) -> SeasonalityRow {
        SeasonalityRow {
            year,
            month,
            total_sales: sales,
            total_profit: 0.0,
        }
    }

    fn profit(label: &str, total: f64) -> ProfitRow {
        ProfitRow {
            label: label.into(),
            total_profit: total,
        }
    }

    #[test]
    fn month_names_are_fixed() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(11), "Nov");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(0), "???");
        assert_eq!(month_name(13), "???");
    }

    #[test]
    fn peak_and_trough_re_aggregate_across_years() {
        // Month 1 totals 150 across two years; month 2 totals 90.
        let rows = vec![
            season(2015, 1, 100.0),
            season(2016, 1, 50.0),
            season(2015, 2, 90.0),
        ];
        let summary = derive_insights(&rows, &[]);
        let peak = summary.peak.unwrap();
        assert_eq!(peak.month, 1);
        assert_eq!(peak.name, "Jan");
        assert_eq!(peak.sales_usd, 150);
        let trough = summary.trough.unwrap();
        assert_eq!(trough.month, 2);
        assert_eq!(trough.sales_usd, 90);
    }

    #[test]
    fn ties_go_to_the_earliest_month() {
        let rows = vec![season(2015, 3, 100.0), season(2015, 7, 100.0)];
        let summary = derive_insights(&rows, &[]);
        assert_eq!(summary.peak.unwrap().month, 3);
        assert_eq!(summary.trough.unwrap().month, 3);
    }

    #[test]
    fn usd_values_round_down() {
        let rows = vec![season(2015, 1, 99.99)];
        let summary = derive_insights(&rows, &[profit("Tech", -50.5)]);
        assert_eq!(summary.peak.unwrap().sales_usd, 99);
        // Floor, not truncation: -50.5 rounds down to -51.
        assert_eq!(summary.top.unwrap().profit_usd, -51);
    }

    #[test]
    fn top_and_bottom_from_sorted_rows() {
        let rows = vec![profit("Tech", 400.0), profit("Furniture", -50.0)];
        let summary = derive_insights(&[], &rows);
        assert_eq!(summary.top.unwrap().label, "Tech");
        let bottom = summary.bottom.unwrap();
        assert_eq!(bottom.label, "Furniture");
        assert_eq!(bottom.profit_usd, -50);
    }

    #[test]
    fn single_group_is_both_top_and_bottom() {
        let rows = vec![profit("Tech", 400.0)];
        let summary = derive_insights(&[], &rows);
        assert_eq!(summary.top, summary.bottom);
    }

    #[test]
    fn empty_aggregates_yield_sentinel_state() {
        let summary = derive_insights(&[], &[]);
        assert_eq!(summary, InsightSummary::default());
        assert!(summary.peak.is_none());
        assert!(summary.bottom.is_none());
    }

    #[test]
    fn single_month_is_both_peak_and_trough() {
        let rows = vec![season(2015, 6, 42.0)];
        let summary = derive_insights(&rows, &[]);
        assert_eq!(summary.peak, summary.trough);
    }
}
