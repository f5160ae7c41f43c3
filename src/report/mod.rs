//! Human-readable terminal rendering.
//!
//! Everything here is presentation only; the numbers come straight from the
//! analytics layer. Charts and widget layout are out of scope — the
//! "dashboard" is plain text.

use colored::Colorize;

use crate::analytics::{
    InsightSummary, NO_DATA, ProfitabilityReport, SeasonalityReport, month_name,
};
use crate::loader::DatasetStatus;

/// Render the seasonality aggregate as an aligned table.
pub fn render_seasonality(report: &SeasonalityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} (years {}, regions {})\n",
        "Seasonality of sales & profit".bold(),
        report.years,
        report.regions.join(", ")
    ));
    if report.rows.is_empty() {
        out.push_str(&format!("  {}\n", NO_DATA.dimmed()));
        return out;
    }
    out.push_str(&format!(
        "  {:<9} {:>16} {:>16}\n",
        "bucket", "sales", "profit"
    ));
    for row in &report.rows {
        let profit = fmt_money(row.total_profit);
        let profit = if row.total_profit < 0.0 {
            profit.red().to_string()
        } else {
            profit
        };
        out.push_str(&format!(
            "  {:<9} {:>16} {:>16}\n",
            format!("{}-{}", row.year, month_name(row.month)),
            fmt_money(row.total_sales),
            profit,
        ));
    }
    out.push_str(&format!(
        "  {:<9} {:>16} {:>16}\n",
        "total",
        fmt_money(report.total_sales()),
        fmt_money(report.total_profit()),
    ));
    out
}

/// Render the profitability aggregate, highest profit first.
pub fn render_profitability(report: &ProfitabilityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Profit by {}", report.level).bold()
    ));
    if report.rows.is_empty() {
        out.push_str(&format!("  {}\n", NO_DATA.dimmed()));
        return out;
    }
    for row in &report.rows {
        let profit = fmt_money(row.total_profit);
        let profit = if row.total_profit < 0.0 {
            profit.red().to_string()
        } else {
            profit
        };
        out.push_str(&format!("  {:<48} {:>16}\n", clip(&row.label, 48), profit));
    }
    out
}

/// Render the insight summary as bullet lines.
pub fn render_insights(summary: &InsightSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Key insights".bold()));
    for line in insight_lines(summary) {
        out.push_str(&format!("  - {line}\n"));
    }
    out
}

/// The insight text lines, shared between the human report and the JSON
/// envelope.
pub fn insight_lines(summary: &InsightSummary) -> Vec<String> {
    let mut lines = Vec::new();
    match (&summary.peak, &summary.trough) {
        (Some(peak), Some(trough)) => {
            lines.push(format!(
                "Peak sales month: {} ({})",
                peak.name,
                fmt_usd(peak.sales_usd)
            ));
            lines.push(format!(
                "Trough sales month: {} ({})",
                trough.name,
                fmt_usd(trough.sales_usd)
            ));
        }
        _ => lines.push(format!("Seasonality: {NO_DATA}")),
    }
    match (&summary.top, &summary.bottom) {
        (Some(top), Some(bottom)) => {
            lines.push(format!(
                "Top performer: {} ({})",
                top.label,
                fmt_usd(top.profit_usd)
            ));
            lines.push(format!(
                "Bottom performer: {} ({})",
                bottom.label,
                fmt_usd(bottom.profit_usd)
            ));
        }
        _ => lines.push(format!("Profitability: {NO_DATA}")),
    }
    lines
}

/// Render the dataset status block.
pub fn render_status(status: &DatasetStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Dataset".bold()));
    out.push_str(&format!("  orders:        {}\n", status.order_count));
    out.push_str(&format!(
        "  years:         {}\n",
        status
            .years
            .map(|y| y.to_string())
            .unwrap_or_else(|| NO_DATA.to_string())
    ));
    out.push_str(&format!("  regions:       {}\n", status.regions.join(", ")));
    out.push_str(&format!(
        "  taxonomy:      {} categories, {} sub-categories, {} products\n",
        status.category_count, status.sub_category_count, status.product_count
    ));
    out.push_str(&format!("  returned:      {}\n", status.returned_count));
    out.push_str(&format!(
        "  salesperson:   {:.2}% of orders covered\n",
        status.salesperson_coverage_pct
    ));
    out
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format whole dollars with thousands separators: `-1234567` → `-$1,234,567`.
pub fn fmt_usd(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&value.unsigned_abs().to_string()))
}

/// Format dollars and cents with thousands separators.
pub fn fmt_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    // 0.999 rounds up to 100 cents; carry into the whole part.
    let (whole, cents) = if cents >= 100 {
        (whole + 1, 0)
    } else {
        (whole, cents)
    };
    format!(
        "{sign}${}.{:02}",
        group_thousands(&whole.to_string()),
        cents
    )
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

fn clip(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let clipped: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{clipped}…")
    }
}
